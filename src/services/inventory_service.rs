// src/services/inventory_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FabricRepository,
    models::inventory::{Fabric, MovementType, StockMovement},
};

#[derive(Clone)]
pub struct InventoryService {
    fabric_repo: FabricRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(fabric_repo: FabricRepository, pool: PgPool) -> Self {
        Self { fabric_repo, pool }
    }

    pub async fn list_fabrics(&self) -> Result<Vec<Fabric>, AppError> {
        self.fabric_repo.list_fabrics().await
    }

    // --- CRIAÇÃO DE TECIDO (com estoque inicial) ---
    // Tecido, primeiro lote e movimentação IN nascem na mesma transação:
    // ou os três existem, ou nenhum.
    pub async fn create_fabric(
        &self,
        name: &str,
        fabric_type: &str,
        color: Option<&str>,
        initial_quantity: Decimal,
        unit: &str,
        reorder_level: Decimal,
        batch_number: &str,
        supplier_name: Option<&str>,
        supplier_contact: Option<&str>,
        unit_cost: Option<Decimal>,
        created_by: Uuid,
    ) -> Result<Fabric, AppError> {
        let mut tx = self.pool.begin().await?;

        let fabric = self
            .fabric_repo
            .insert_fabric(
                &mut *tx,
                name,
                fabric_type,
                color,
                initial_quantity,
                unit,
                reorder_level,
                created_by,
            )
            .await?;

        let batch = self
            .fabric_repo
            .insert_batch(
                &mut *tx,
                fabric.id,
                batch_number,
                initial_quantity,
                supplier_name,
                supplier_contact,
                unit_cost,
                created_by,
            )
            .await?;

        self.fabric_repo
            .record_movement(
                &mut *tx,
                fabric.id,
                MovementType::In,
                initial_quantity,
                Some(batch.id),
                None,
                Some("Estoque inicial"),
                created_by,
            )
            .await?;

        tx.commit().await?;

        tracing::info!("Tecido '{}' criado com saldo inicial {}", fabric.name, initial_quantity);
        Ok(fabric)
    }

    // --- EMISSÃO (SAÍDA) ---
    // Checagem de saldo, débito do contador e gravação da movimentação na
    // MESMA transação, com a linha do tecido travada. Se a quantidade excede
    // o saldo, nada é gravado.
    pub async fn issue_fabric(
        &self,
        fabric_id: Uuid,
        quantity: Decimal,
        job_card_id: Option<Uuid>,
        notes: Option<&str>,
        created_by: Uuid,
    ) -> Result<StockMovement, AppError> {
        let mut tx = self.pool.begin().await?;

        let fabric = self
            .fabric_repo
            .find_fabric_for_update(&mut *tx, fabric_id)
            .await?
            .ok_or(AppError::NotFound("Tecido"))?;

        if quantity > fabric.current_quantity {
            return Err(AppError::InsufficientStock);
        }

        self.fabric_repo
            .adjust_quantity(&mut *tx, fabric_id, MovementType::Out.signed_delta(quantity))
            .await?;

        let movement = self
            .fabric_repo
            .record_movement(
                &mut *tx,
                fabric_id,
                MovementType::Out,
                quantity,
                None,
                job_card_id,
                notes,
                created_by,
            )
            .await?;

        // Se a saída está vinculada a um cartão, acumula no requisito.
        if let Some(job_id) = job_card_id {
            self.fabric_repo
                .accumulate_issued(&mut *tx, job_id, fabric_id, quantity)
                .await?;
        }

        tx.commit().await?;
        Ok(movement)
    }

    // --- DEVOLUÇÃO ---
    // Simétrica à emissão, sem limite superior.
    pub async fn return_fabric(
        &self,
        fabric_id: Uuid,
        quantity: Decimal,
        job_card_id: Option<Uuid>,
        notes: Option<&str>,
        created_by: Uuid,
    ) -> Result<StockMovement, AppError> {
        let mut tx = self.pool.begin().await?;

        self.fabric_repo
            .find_fabric_for_update(&mut *tx, fabric_id)
            .await?
            .ok_or(AppError::NotFound("Tecido"))?;

        self.fabric_repo
            .adjust_quantity(&mut *tx, fabric_id, MovementType::Return.signed_delta(quantity))
            .await?;

        let movement = self
            .fabric_repo
            .record_movement(
                &mut *tx,
                fabric_id,
                MovementType::Return,
                quantity,
                None,
                job_card_id,
                notes,
                created_by,
            )
            .await?;

        // Devolução vinculada a cartão desconta do emitido (esbarra em zero).
        if let Some(job_id) = job_card_id {
            self.fabric_repo
                .accumulate_issued(&mut *tx, job_id, fabric_id, -quantity)
                .await?;
        }

        tx.commit().await?;
        Ok(movement)
    }

    // --- ENTRADA POSTERIOR (novo lote) ---
    // Lotes são imutáveis: cada recebimento vira um lote novo.
    pub async fn add_stock(
        &self,
        fabric_id: Uuid,
        quantity: Decimal,
        batch_number: &str,
        supplier_name: Option<&str>,
        supplier_contact: Option<&str>,
        unit_cost: Option<Decimal>,
        notes: Option<&str>,
        created_by: Uuid,
    ) -> Result<Fabric, AppError> {
        let mut tx = self.pool.begin().await?;

        self.fabric_repo
            .find_fabric_for_update(&mut *tx, fabric_id)
            .await?
            .ok_or(AppError::NotFound("Tecido"))?;

        let batch = self
            .fabric_repo
            .insert_batch(
                &mut *tx,
                fabric_id,
                batch_number,
                quantity,
                supplier_name,
                supplier_contact,
                unit_cost,
                created_by,
            )
            .await?;

        let fabric = self
            .fabric_repo
            .adjust_quantity(&mut *tx, fabric_id, MovementType::In.signed_delta(quantity))
            .await?;

        self.fabric_repo
            .record_movement(
                &mut *tx,
                fabric_id,
                MovementType::In,
                quantity,
                Some(batch.id),
                None,
                notes,
                created_by,
            )
            .await?;

        tx.commit().await?;
        Ok(fabric)
    }

    pub async fn delete_fabric(&self, id: Uuid) -> Result<(), AppError> {
        self.fabric_repo.delete_fabric(id).await
    }
}
