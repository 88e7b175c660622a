use super::ICoachingRecordRepo;
use parley_domain::{ClientCoachingRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresCoachingRecordRepo {
    pool: PgPool,
}

impl PostgresCoachingRecordRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CoachingRecordRaw {
    record_id: String,
    organization_uid: Option<Uuid>,
    client_uid: Uuid,
    next_call: Option<serde_json::Value>,
}

impl From<CoachingRecordRaw> for ClientCoachingRecord {
    fn from(r: CoachingRecordRaw) -> Self {
        Self {
            id: r.record_id,
            organization_id: r.organization_uid.map(ID::from),
            client_user_id: r.client_uid.into(),
            next_call: r
                .next_call
                .map(|next_call| serde_json::from_value(next_call).unwrap()),
        }
    }
}

#[async_trait::async_trait]
impl ICoachingRecordRepo for PostgresCoachingRecordRepo {
    async fn insert(&self, record: &ClientCoachingRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO client_coaching_records(record_id, organization_uid, client_uid, next_call)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(&record.id)
        .bind(record.organization_id.as_ref().map(|id| *id.inner_ref()))
        .bind(record.client_user_id.inner_ref())
        .bind(
            record
                .next_call
                .as_ref()
                .map(serde_json::to_value)
                .transpose()?,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, record: &ClientCoachingRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE client_coaching_records SET next_call = $2
            WHERE record_id = $1
            "#,
        )
        .bind(&record.id)
        .bind(
            record
                .next_call
                .as_ref()
                .map(serde_json::to_value)
                .transpose()?,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, record_id: &str) -> Option<ClientCoachingRecord> {
        let res: Option<CoachingRecordRaw> = sqlx::query_as(
            r#"
            SELECT * FROM client_coaching_records
            WHERE record_id = $1
            "#,
        )
        .bind(record_id)
        .fetch_optional(&self.pool)
        .await
        .ok()?;
        res.map(|r| r.into())
    }
}
