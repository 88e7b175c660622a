use super::ICalendarGrantRepo;
use parley_domain::CalendarGrant;
use sqlx::{FromRow, PgPool};

pub struct PostgresCalendarGrantRepo {
    pool: PgPool,
}

impl PostgresCalendarGrantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CalendarGrantRaw {
    grant_id: String,
    calendar_id: Option<String>,
    status: String,
}

impl From<CalendarGrantRaw> for CalendarGrant {
    fn from(g: CalendarGrantRaw) -> Self {
        Self {
            id: g.grant_id,
            calendar_id: g.calendar_id,
            status: g.status.parse().unwrap(),
        }
    }
}

#[async_trait::async_trait]
impl ICalendarGrantRepo for PostgresCalendarGrantRepo {
    async fn insert(&self, grant: &CalendarGrant) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO calendar_grants(grant_id, calendar_id, status)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(&grant.id)
        .bind(&grant.calendar_id)
        .bind(grant.status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_active(&self, grant_id: &str) -> Option<CalendarGrant> {
        let res: Option<CalendarGrantRaw> = sqlx::query_as(
            r#"
            SELECT * FROM calendar_grants
            WHERE grant_id = $1 AND status = 'active'
            "#,
        )
        .bind(grant_id)
        .fetch_optional(&self.pool)
        .await
        .ok()?;
        res.map(|g| g.into())
    }
}
