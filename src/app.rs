use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/dashboard", get(handlers::dashboard_page))
        .route("/login", get(handlers::login_page))
        .route("/register", get(handlers::register_page))
        .route("/boards/new", get(handlers::new_board_page))
        .route("/boards/:board_id", get(handlers::board_page))
        .route("/boards/:board_id/cards/new", get(handlers::new_card_page))
        .route(
            "/boards/:board_id/cards/:card_id/edit",
            get(handlers::edit_card_page),
        )
        .route("/api/accounts/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route(
            "/api/boards",
            get(handlers::list_boards).post(handlers::create_board),
        )
        .route(
            "/api/boards/:board_id/cards",
            get(handlers::list_cards).post(handlers::create_card),
        )
        .route(
            "/api/boards/:board_id/cards/:card_id",
            put(handlers::update_card),
        )
        .route(
            "/api/boards/:board_id/cards/:card_id/toggle",
            post(handlers::toggle_card),
        )
        .route(
            "/api/boards/:board_id/cards/:card_id/audit",
            get(handlers::card_audit),
        )
        .with_state(state)
}
