// src/db/fabric_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Fabric, FabricBatch, MovementType, StockMovement},
};

#[derive(Clone)]
pub struct FabricRepository {
    pool: PgPool,
}

impl FabricRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---
    // Leituras simples usam a pool principal.

    pub async fn list_fabrics(&self) -> Result<Vec<Fabric>, AppError> {
        let fabrics = sqlx::query_as::<_, Fabric>("SELECT * FROM fabrics ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(fabrics)
    }

    pub async fn find_fabric(&self, id: Uuid) -> Result<Option<Fabric>, AppError> {
        let fabric = sqlx::query_as::<_, Fabric>("SELECT * FROM fabrics WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fabric)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---
    // Usam o padrão genérico 'Executor' para rodar dentro de uma transação.

    /// Busca o tecido travando a linha (FOR UPDATE). É o que garante que a
    /// checagem de saldo e o débito enxerguem o mesmo valor.
    pub async fn find_fabric_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Fabric>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fabric = sqlx::query_as::<_, Fabric>("SELECT * FROM fabrics WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(fabric)
    }

    pub async fn insert_fabric<'e, E>(
        &self,
        executor: E,
        name: &str,
        fabric_type: &str,
        color: Option<&str>,
        initial_quantity: Decimal,
        unit: &str,
        reorder_level: Decimal,
        created_by: Uuid,
    ) -> Result<Fabric, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fabric = sqlx::query_as::<_, Fabric>(
            r#"
            INSERT INTO fabrics (name, fabric_type, color, current_quantity, unit, reorder_level, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(fabric_type)
        .bind(color)
        .bind(initial_quantity)
        .bind(unit)
        .bind(reorder_level)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(fabric)
    }

    /// Soma (ou subtrai) `delta` do saldo corrente. Sempre chamado na mesma
    /// transação que grava a movimentação correspondente.
    pub async fn adjust_quantity<'e, E>(
        &self,
        executor: E,
        fabric_id: Uuid,
        delta: Decimal,
    ) -> Result<Fabric, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fabric = sqlx::query_as::<_, Fabric>(
            r#"
            UPDATE fabrics
            SET current_quantity = current_quantity + $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(fabric_id)
        .bind(delta)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Tecido"))?;
        Ok(fabric)
    }

    /// Cria o registro imutável de um recebimento (lote).
    pub async fn insert_batch<'e, E>(
        &self,
        executor: E,
        fabric_id: Uuid,
        batch_number: &str,
        quantity: Decimal,
        supplier_name: Option<&str>,
        supplier_contact: Option<&str>,
        unit_cost: Option<Decimal>,
        created_by: Uuid,
    ) -> Result<FabricBatch, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batch = sqlx::query_as::<_, FabricBatch>(
            r#"
            INSERT INTO fabric_batches
                (fabric_id, batch_number, quantity, supplier_name, supplier_contact, unit_cost, purchase_date, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, CURRENT_DATE, $7)
            RETURNING *
            "#,
        )
        .bind(fabric_id)
        .bind(batch_number)
        .bind(quantity)
        .bind(supplier_name)
        .bind(supplier_contact)
        .bind(unit_cost)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(batch)
    }

    /// Registra uma movimentação no livro-razão.
    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        fabric_id: Uuid,
        movement_type: MovementType,
        quantity: Decimal,
        batch_id: Option<Uuid>,
        job_card_id: Option<Uuid>,
        notes: Option<&str>,
        created_by: Uuid,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements
                (fabric_id, movement_type, quantity, batch_id, job_card_id, notes, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(fabric_id)
        .bind(movement_type)
        .bind(quantity)
        .bind(batch_id)
        .bind(job_card_id)
        .bind(notes)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }

    /// Acumula a quantidade emitida no vínculo cartão/tecido. Se o cartão não
    /// declarou esse tecido como requisito, nada é atualizado (a movimentação
    /// em si continua registrada com a referência ao cartão).
    pub async fn accumulate_issued<'e, E>(
        &self,
        executor: E,
        job_card_id: Uuid,
        fabric_id: Uuid,
        delta: Decimal,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE job_card_fabrics
            SET issued_quantity = GREATEST(issued_quantity + $3, 0)
            WHERE job_card_id = $1 AND fabric_id = $2
            "#,
        )
        .bind(job_card_id)
        .bind(fabric_id)
        .bind(delta)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Remove o tecido; lotes, movimentações e vínculos caem em cascata
    /// (ON DELETE CASCADE no esquema).
    pub async fn delete_fabric(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM fabrics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tecido"));
        }
        Ok(())
    }
}
