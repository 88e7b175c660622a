use crate::error::ParleyError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use parley_api_structs::get_event::{APIResponse, PathParams};
use parley_domain::{SchedulableEvent, ID};
use parley_infra::ParleyContext;

pub async fn get_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<ParleyContext>,
) -> Result<HttpResponse, ParleyError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetEventUseCase {
        event_id: path_params.event_id.clone(),
        user_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(ParleyError::from)
}

#[derive(Debug)]
pub struct GetEventUseCase {
    pub event_id: ID,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    NotAParticipant,
}

impl From<UseCaseError> for ParleyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::NotAParticipant => {
                Self::Forbidden("Only a participant of the event can view it".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventUseCase {
    type Response = SchedulableEvent;

    type Error = UseCaseError;

    async fn execute(&mut self, ctx: &ParleyContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.events.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        if !event.is_participant(&self.user_id) {
            return Err(UseCaseError::NotAParticipant);
        }
        Ok(event)
    }
}
