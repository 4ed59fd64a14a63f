use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The two display buckets a card can live in. `Red` cards render in the
/// "Problems" column, `Green` cards in "Solutions".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardState {
    Red,
    Green,
}

impl CardState {
    pub fn toggled(self) -> Self {
        match self {
            CardState::Red => CardState::Green,
            CardState::Green => CardState::Red,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            CardState::Red => "card-red",
            CardState::Green => "card-green",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardState::Red => "RED",
            CardState::Green => "GREEN",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: u64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: u64,
    pub board_id: u64,
    pub title: String,
    pub details: Option<String>,
    pub position: i32,
    pub state: CardState,
    pub reset_time: NaiveTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One state transition. Stored per card, append-only; the same shape goes
/// out on the wire for the audit endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub previous_state: CardState,
    pub new_state: CardState,
    pub changed_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub next_id: u64,
    pub accounts: BTreeMap<u64, Account>,
    pub boards: BTreeMap<u64, Board>,
    pub cards: BTreeMap<u64, Card>,
    pub audit_log: BTreeMap<u64, Vec<AuditEntry>>,
}

impl AppData {
    pub fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.email == email)
    }

    /// Cards of one board, ordered by position then id.
    pub fn cards_for_board(&self, board_id: u64) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self
            .cards
            .values()
            .filter(|c| c.board_id == board_id)
            .collect();
        cards.sort_by_key(|c| (c.position, c.id));
        cards
    }

    /// Audit entries for one card, newest first.
    pub fn audit_for_card(&self, card_id: u64) -> Vec<AuditEntry> {
        let mut entries = self.audit_log.get(&card_id).cloned().unwrap_or_default();
        entries.sort_by(|a, b| b.changed_at.cmp(&a.changed_at));
        entries
    }
}

/// Parse a 24-hour `HH:mm` reset time. `"9:30"` is accepted, `"25:00"` and
/// anything carrying seconds is not.
pub fn parse_reset_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

// ---- request/response bodies -------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct BoardRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

impl BoardResponse {
    pub fn from_board(board: &Board) -> Self {
        Self {
            id: board.id,
            name: board.name.clone(),
            description: board.description.clone(),
            created_at: board.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    pub title: String,
    pub details: Option<String>,
    pub state: Option<CardState>,
    pub reset_time: String,
    pub position: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub id: u64,
    pub title: String,
    pub details: Option<String>,
    pub position: i32,
    pub state: CardState,
    pub reset_time: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CardResponse {
    pub fn from_card(card: &Card) -> Self {
        Self {
            id: card.id,
            title: card.title.clone(),
            details: card.details.clone(),
            position: card.position,
            state: card.state,
            reset_time: card.reset_time.format("%H:%M").to_string(),
            created_at: card.created_at,
            updated_at: card.updated_at,
        }
    }
}

/// Body of create/update responses: the touched id plus a human message.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: u64,
    pub state: CardState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_time_accepts_24h_values() {
        assert_eq!(parse_reset_time("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_reset_time("0:00"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_reset_time("23:59"), NaiveTime::from_hms_opt(23, 59, 0));
    }

    #[test]
    fn reset_time_rejects_out_of_range_and_garbage() {
        assert_eq!(parse_reset_time("25:00"), None);
        assert_eq!(parse_reset_time("12:60"), None);
        assert_eq!(parse_reset_time("noon"), None);
        assert_eq!(parse_reset_time(""), None);
    }

    #[test]
    fn card_state_round_trips_screaming_names() {
        assert_eq!(serde_json::to_string(&CardState::Red).unwrap(), "\"RED\"");
        assert_eq!(
            serde_json::from_str::<CardState>("\"GREEN\"").unwrap(),
            CardState::Green
        );
    }

    #[test]
    fn cards_for_board_orders_by_position_then_id() {
        let mut data = AppData::default();
        let now = chrono::Local::now().naive_local();
        for (id, position) in [(1u64, 2), (2, 0), (3, 0)] {
            data.cards.insert(
                id,
                Card {
                    id,
                    board_id: 7,
                    title: format!("card {id}"),
                    details: None,
                    position,
                    state: CardState::Red,
                    reset_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
                    created_at: now,
                    updated_at: now,
                },
            );
        }
        let ids: Vec<u64> = data.cards_for_board(7).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
