// src/db/activity_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use crate::{
    common::error::AppError,
    models::activities::{Activity, NewActivity},
};

#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, id_1, id_2, descripcion, rendimiento, ponderacion, unidad
            FROM actividades
            ORDER BY id ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(activities)
    }

    pub async fn create_activity<'e, E>(
        &self,
        executor: E,
        activity: &NewActivity,
    ) -> Result<Activity, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO actividades (id_1, id_2, descripcion, rendimiento, ponderacion, unidad)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, id_1, id_2, descripcion, rendimiento, ponderacion, unidad
            "#,
        )
            .bind(activity.external_id_1.as_deref())
            .bind(activity.external_id_2.as_deref())
            .bind(&activity.description)
            .bind(activity.performance_rate)
            .bind(activity.weighting)
            .bind(activity.unit.as_deref())
            .fetch_one(executor)
            .await?;
        Ok(created)
    }
}
