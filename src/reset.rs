use crate::errors::AppError;
use crate::models::{AppData, AuditEntry, Card, CardState};
use crate::state::AppState;
use crate::storage::persist_data;
use chrono::{Local, NaiveDateTime};
use std::time::Duration;
use tracing::{error, info};

/// Whether a card's daily reset is due.
///
/// A `GREEN` card goes back to `RED` once its reset time has passed today,
/// anchored on the last transition to `GREEN`: if that transition already
/// happened today after the reset time, the card earned its green for the
/// current cycle and is left alone.
pub fn due_for_reset(card: &Card, last_green_change: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
    if card.state != CardState::Green {
        return false;
    }
    let Some(last_change) = last_green_change else {
        return false;
    };
    if now.time() < card.reset_time {
        return false;
    }
    if last_change.date() == now.date() && last_change.time() > card.reset_time {
        return false;
    }
    true
}

fn last_green_change(data: &AppData, card_id: u64) -> Option<NaiveDateTime> {
    data.audit_log
        .get(&card_id)?
        .iter()
        .filter(|e| e.new_state == CardState::Green)
        .map(|e| e.changed_at)
        .max()
}

/// Apply due resets to the in-memory data. Returns the ids of reset cards.
pub fn apply_due_resets(data: &mut AppData, now: NaiveDateTime) -> Vec<u64> {
    let due: Vec<u64> = data
        .cards
        .values()
        .filter(|card| due_for_reset(card, last_green_change(data, card.id), now))
        .map(|card| card.id)
        .collect();

    for id in &due {
        if let Some(card) = data.cards.get_mut(id) {
            card.state = CardState::Red;
            card.updated_at = now;
        }
        data.audit_log.entry(*id).or_default().push(AuditEntry {
            previous_state: CardState::Green,
            new_state: CardState::Red,
            changed_at: now,
        });
    }
    due
}

async fn run_sweep(state: &AppState) -> Result<(), AppError> {
    let now = Local::now().naive_local();
    let mut data = state.data.lock().await;
    let reset = apply_due_resets(&mut data, now);
    if !reset.is_empty() {
        info!("reset {} card(s) to RED: {:?}", reset.len(), reset);
        persist_data(&state.data_path, &data).await?;
    }
    Ok(())
}

/// Spawn the once-a-minute reset sweep.
pub fn spawn_reset_task(state: AppState) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(err) = run_sweep(&state).await {
                error!("card reset sweep failed: {}", err.message);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn card(state: CardState, reset_hhmm: (u32, u32)) -> Card {
        let now = datetime(2025, 3, 10, 12, 0);
        Card {
            id: 1,
            board_id: 1,
            title: "water plants".into(),
            details: None,
            position: 0,
            state,
            reset_time: NaiveTime::from_hms_opt(reset_hhmm.0, reset_hhmm.1, 0).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn red_cards_are_never_due() {
        let card = card(CardState::Red, (6, 0));
        let now = datetime(2025, 3, 10, 12, 0);
        assert!(!due_for_reset(&card, Some(datetime(2025, 3, 9, 20, 0)), now));
    }

    #[test]
    fn green_without_audit_anchor_is_not_due() {
        let card = card(CardState::Green, (6, 0));
        let now = datetime(2025, 3, 10, 12, 0);
        assert!(!due_for_reset(&card, None, now));
    }

    #[test]
    fn not_due_before_reset_time() {
        let card = card(CardState::Green, (18, 0));
        let now = datetime(2025, 3, 10, 12, 0);
        assert!(!due_for_reset(&card, Some(datetime(2025, 3, 9, 20, 0)), now));
    }

    #[test]
    fn due_when_green_from_yesterday_and_reset_time_passed() {
        let card = card(CardState::Green, (6, 0));
        let now = datetime(2025, 3, 10, 6, 30);
        assert!(due_for_reset(&card, Some(datetime(2025, 3, 9, 20, 0)), now));
    }

    #[test]
    fn not_due_when_turned_green_today_after_reset_time() {
        let card = card(CardState::Green, (6, 0));
        let now = datetime(2025, 3, 10, 12, 0);
        assert!(!due_for_reset(&card, Some(datetime(2025, 3, 10, 8, 0)), now));
    }

    #[test]
    fn due_when_turned_green_today_before_reset_time() {
        let card = card(CardState::Green, (6, 0));
        let now = datetime(2025, 3, 10, 7, 0);
        assert!(due_for_reset(&card, Some(datetime(2025, 3, 10, 5, 30)), now));
    }

    #[test]
    fn apply_due_resets_flips_state_and_appends_audit() {
        let mut data = AppData::default();
        let mut c = card(CardState::Green, (6, 0));
        c.id = 42;
        data.cards.insert(42, c);
        data.audit_log.insert(
            42,
            vec![AuditEntry {
                previous_state: CardState::Red,
                new_state: CardState::Green,
                changed_at: datetime(2025, 3, 9, 20, 0),
            }],
        );

        let now = datetime(2025, 3, 10, 6, 30);
        assert_eq!(apply_due_resets(&mut data, now), vec![42]);
        assert_eq!(data.cards[&42].state, CardState::Red);

        let entries = data.audit_for_card(42);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].previous_state, CardState::Green);
        assert_eq!(entries[0].new_state, CardState::Red);
        assert_eq!(entries[0].changed_at, now);

        // A second sweep at the same instant finds nothing to do.
        assert!(apply_due_resets(&mut data, now).is_empty());
    }
}
