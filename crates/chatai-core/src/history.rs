//! Conversation window selection.

use chrono::{DateTime, Utc};

use crate::types::{ChatRole, ChatTurn};

/// Number of prior messages sent as context when nothing else is configured.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// A persisted message that can take part in the context window.
pub trait HistorySource {
    fn role(&self) -> ChatRole;
    fn content(&self) -> &str;
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Select the `window` most recent messages and return them oldest-first.
///
/// Messages sharing a timestamp keep their relative input order, so callers
/// should pass rows in insertion order.
pub fn assemble_history<M: HistorySource>(messages: &[M], window: usize) -> Vec<ChatTurn> {
    let mut newest_first: Vec<(usize, &M)> = messages.iter().enumerate().collect();
    newest_first.sort_by(|(ia, a), (ib, b)| {
        b.timestamp()
            .cmp(&a.timestamp())
            .then_with(|| ib.cmp(ia))
    });

    let mut selected: Vec<ChatTurn> = newest_first
        .into_iter()
        .take(window)
        .map(|(_, m)| ChatTurn::new(m.role(), m.content()))
        .collect();
    selected.reverse();
    selected
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    struct Row {
        role: ChatRole,
        content: String,
        at: DateTime<Utc>,
    }

    impl HistorySource for Row {
        fn role(&self) -> ChatRole {
            self.role
        }
        fn content(&self) -> &str {
            &self.content
        }
        fn timestamp(&self) -> DateTime<Utc> {
            self.at
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        (0..n)
            .map(|i| Row {
                role: if i % 2 == 0 { ChatRole::User } else { ChatRole::Assistant },
                content: format!("m{i}"),
                at: base + Duration::seconds(i as i64),
            })
            .collect()
    }

    fn contents(turns: &[ChatTurn]) -> Vec<&str> {
        turns.iter().map(|t| t.content.as_str()).collect()
    }

    #[test]
    fn empty_history_is_valid() {
        let none: Vec<Row> = Vec::new();
        assert!(assemble_history(&none, DEFAULT_HISTORY_WINDOW).is_empty());
    }

    #[test]
    fn short_history_is_returned_whole_in_order() {
        let turns = assemble_history(&rows(3), DEFAULT_HISTORY_WINDOW);
        assert_eq!(contents(&turns), ["m0", "m1", "m2"]);
        assert_eq!(turns[1].role, ChatRole::Assistant);
    }

    #[test]
    fn long_history_keeps_most_recent_window() {
        let turns = assemble_history(&rows(25), 10);
        assert_eq!(turns.len(), 10);
        assert_eq!(turns.first().map(|t| t.content.as_str()), Some("m15"));
        assert_eq!(turns.last().map(|t| t.content.as_str()), Some("m24"));
    }

    #[test]
    fn unordered_input_comes_out_chronological() {
        let mut input = rows(6);
        input.reverse();
        input.swap(1, 4);
        let turns = assemble_history(&input, 4);
        assert_eq!(contents(&turns), ["m2", "m3", "m4", "m5"]);
    }

    #[test]
    fn equal_timestamps_follow_input_order() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let input: Vec<Row> = ["question", "answer", "follow-up"]
            .into_iter()
            .map(|c| Row {
                role: ChatRole::User,
                content: c.to_owned(),
                at,
            })
            .collect();
        let turns = assemble_history(&input, 2);
        assert_eq!(contents(&turns), ["answer", "follow-up"]);
    }

    #[test]
    fn window_bounds_length_for_every_size() {
        for n in 0..15 {
            for w in 0..12 {
                let turns = assemble_history(&rows(n), w);
                assert_eq!(turns.len(), n.min(w), "n={n} w={w}");
            }
        }
    }
}
