// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Tecidos ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Fabric {
    pub id: Uuid,
    pub name: String,
    pub fabric_type: String,
    pub color: Option<String>,
    pub current_quantity: Decimal,
    pub unit: String,
    pub reorder_level: Decimal,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// "Estoque baixo" é sempre derivado na leitura (saldo <= nível de
/// reposição), nunca uma flag persistida.
pub fn low_stock(current_quantity: Decimal, reorder_level: Decimal) -> bool {
    current_quantity <= reorder_level
}

// Resposta da listagem: tecido + flag derivada.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FabricResponse {
    pub id: Uuid,
    pub name: String,
    pub fabric_type: String,
    pub color: Option<String>,
    pub current_quantity: Decimal,
    pub unit: String,
    pub reorder_level: Decimal,
    pub low_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Fabric> for FabricResponse {
    fn from(f: Fabric) -> Self {
        let low = low_stock(f.current_quantity, f.reorder_level);
        Self {
            id: f.id,
            name: f.name,
            fabric_type: f.fabric_type,
            color: f.color,
            current_quantity: f.current_quantity,
            unit: f.unit,
            reorder_level: f.reorder_level,
            low_stock: low,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

// --- 2. Lotes (um registro por recebimento, imutável após a criação) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FabricBatch {
    pub id: Uuid,
    pub fabric_id: Uuid,
    pub batch_number: String,
    pub quantity: Decimal,
    pub supplier_name: Option<String>,
    pub supplier_contact: Option<String>,
    pub unit_cost: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// --- 3. Movimentações de Estoque ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_type", rename_all = "UPPERCASE")] // Banco
#[serde(rename_all = "UPPERCASE")] // JSON
pub enum MovementType {
    In,
    Out,
    Return,
}

impl MovementType {
    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::In => "IN",
            MovementType::Out => "OUT",
            MovementType::Return => "RETURN",
        }
    }

    /// Efeito da movimentação sobre o saldo: entradas e devoluções somam,
    /// saídas subtraem.
    pub fn signed_delta(self, quantity: Decimal) -> Decimal {
        match self {
            MovementType::In | MovementType::Return => quantity,
            MovementType::Out => -quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub fabric_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub batch_id: Option<Uuid>,
    pub job_card_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estoque_baixo_inclui_a_fronteira() {
        let vinte = Decimal::from(20);
        assert!(low_stock(Decimal::from(15), vinte));
        assert!(low_stock(vinte, vinte)); // igual ao nível ainda é "baixo"
        assert!(!low_stock(Decimal::from(21), vinte));
    }

    #[test]
    fn delta_com_sinal_por_tipo() {
        let qtd = Decimal::from(7);
        assert_eq!(MovementType::In.signed_delta(qtd), qtd);
        assert_eq!(MovementType::Return.signed_delta(qtd), qtd);
        assert_eq!(MovementType::Out.signed_delta(qtd), -qtd);
    }

    #[test]
    fn tipo_de_movimentacao_serializa_em_maiusculas() {
        assert_eq!(serde_json::to_string(&MovementType::In).unwrap(), "\"IN\"");
        assert_eq!(serde_json::to_string(&MovementType::Out).unwrap(), "\"OUT\"");
        assert_eq!(
            serde_json::to_string(&MovementType::Return).unwrap(),
            "\"RETURN\""
        );
    }

    #[test]
    fn saldo_apos_emissao_fica_baixo() {
        // Tecido com 100 e nível 20: emitir 85 deixa 15, já em estoque baixo.
        let mut saldo = Decimal::from(100);
        saldo += MovementType::Out.signed_delta(Decimal::from(85));
        assert_eq!(saldo, Decimal::from(15));
        assert!(low_stock(saldo, Decimal::from(20)));
    }
}
