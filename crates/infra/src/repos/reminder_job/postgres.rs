use super::IReminderJobRepo;
use chrono_tz::Tz;
use parley_domain::{ReminderJob, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::str::FromStr;

pub struct PostgresReminderJobRepo {
    pool: PgPool,
}

impl PostgresReminderJobRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderJobRaw {
    job_id: String,
    event_uid: Uuid,
    job_type: String,
    scheduled_time: i64,
    event_title: String,
    event_start_ts: i64,
    event_timezone: Option<String>,
    event_location: Option<String>,
    host_uid: Uuid,
    host_name: Option<String>,
    client_uid: Option<Uuid>,
    organization_uid: Option<Uuid>,
    executed: bool,
}

impl From<ReminderJobRaw> for ReminderJob {
    fn from(j: ReminderJobRaw) -> Self {
        Self {
            id: j.job_id,
            event_id: j.event_uid.into(),
            job_type: j.job_type.parse().unwrap(),
            scheduled_time: j.scheduled_time,
            event_title: j.event_title,
            event_start_ts: j.event_start_ts,
            event_timezone: j.event_timezone.and_then(|tz| Tz::from_str(&tz).ok()),
            event_location: j.event_location,
            host_user_id: j.host_uid.into(),
            host_name: j.host_name,
            client_user_id: j.client_uid.map(ID::from),
            organization_id: j.organization_uid.map(ID::from),
            executed: j.executed,
        }
    }
}

#[async_trait::async_trait]
impl IReminderJobRepo for PostgresReminderJobRepo {
    async fn bulk_upsert(&self, jobs: &[ReminderJob]) -> anyhow::Result<()> {
        // One transaction so a mid-batch failure never leaves a partial
        // reminder set behind
        let mut tx = self.pool.begin().await?;
        for job in jobs {
            sqlx::query(
                r#"
                INSERT INTO event_scheduled_jobs(
                    job_id,
                    event_uid,
                    job_type,
                    scheduled_time,
                    event_title,
                    event_start_ts,
                    event_timezone,
                    event_location,
                    host_uid,
                    host_name,
                    client_uid,
                    organization_uid,
                    executed
                )
                VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                ON CONFLICT (job_id) DO UPDATE SET
                    scheduled_time = $4,
                    event_title = $5,
                    event_start_ts = $6,
                    event_timezone = $7,
                    event_location = $8,
                    host_name = $10
                "#,
            )
            .bind(&job.id)
            .bind(job.event_id.inner_ref())
            .bind(job.job_type.as_str())
            .bind(job.scheduled_time)
            .bind(&job.event_title)
            .bind(job.event_start_ts)
            .bind(job.event_timezone.map(|tz| tz.name().to_string()))
            .bind(&job.event_location)
            .bind(job.host_user_id.inner_ref())
            .bind(&job.host_name)
            .bind(job.client_user_id.as_ref().map(|id| *id.inner_ref()))
            .bind(job.organization_id.as_ref().map(|id| *id.inner_ref()))
            .bind(job.executed)
            .execute(&mut tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find(&self, job_id: &str) -> Option<ReminderJob> {
        let res: Option<ReminderJobRaw> = sqlx::query_as(
            r#"
            SELECT * FROM event_scheduled_jobs
            WHERE job_id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
        .ok()?;
        res.map(|j| j.into())
    }

    async fn find_by_event(&self, event_id: &ID) -> Vec<ReminderJob> {
        let res: Vec<ReminderJobRaw> = sqlx::query_as(
            r#"
            SELECT * FROM event_scheduled_jobs
            WHERE event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        res.into_iter().map(|j| j.into()).collect()
    }
}
