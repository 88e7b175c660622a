use super::IAvailabilitySettingsRepo;
use parley_domain::{CoachAvailabilitySettings, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAvailabilitySettingsRepo {
    pool: PgPool,
}

impl PostgresAvailabilitySettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AvailabilitySettingsRaw {
    organization_uid: Uuid,
    push_events_to_calendar: bool,
    calendar_grant_id: Option<String>,
    default_duration_minutes: Option<i64>,
}

impl From<AvailabilitySettingsRaw> for CoachAvailabilitySettings {
    fn from(s: AvailabilitySettingsRaw) -> Self {
        Self {
            organization_id: s.organization_uid.into(),
            push_events_to_calendar: s.push_events_to_calendar,
            calendar_grant_id: s.calendar_grant_id,
            default_duration_minutes: s.default_duration_minutes,
        }
    }
}

#[async_trait::async_trait]
impl IAvailabilitySettingsRepo for PostgresAvailabilitySettingsRepo {
    async fn insert(&self, settings: &CoachAvailabilitySettings) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO coach_availability_settings(
                organization_uid,
                push_events_to_calendar,
                calendar_grant_id,
                default_duration_minutes
            )
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(settings.organization_id.inner_ref())
        .bind(settings.push_events_to_calendar)
        .bind(&settings.calendar_grant_id)
        .bind(settings.default_duration_minutes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, organization_id: &ID) -> Option<CoachAvailabilitySettings> {
        let res: Option<AvailabilitySettingsRaw> = sqlx::query_as(
            r#"
            SELECT * FROM coach_availability_settings
            WHERE organization_uid = $1
            "#,
        )
        .bind(organization_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()?;
        res.map(|s| s.into())
    }
}
