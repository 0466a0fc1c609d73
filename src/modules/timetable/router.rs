use crate::modules::timetable::controller::{
    create_timetable_entry, delete_timetable_entry, get_timetable, get_timetable_entry,
    update_timetable_entry,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_timetable_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_timetable_entry).get(get_timetable))
        .route(
            "/{id}",
            get(get_timetable_entry)
                .put(update_timetable_entry)
                .delete(delete_timetable_entry),
        )
}
