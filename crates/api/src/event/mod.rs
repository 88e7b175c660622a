mod get_event;
mod materialize_reminders;
mod respond_to_event;
mod subscribers;
mod sync_client_record;
mod sync_external_calendar;

use actix_web::web;
use get_event::get_event_controller;
use respond_to_event::respond_to_event_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events/{event_id}", web::get().to(get_event_controller));
    cfg.route(
        "/events/{event_id}/respond",
        web::post().to(respond_to_event_controller),
    );
}
