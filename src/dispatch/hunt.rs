//! Geofenced hint hunt.
//!
//! Only allow-listed chats get any reply. Within those, the first matching rule
//! wins: `/start`, `/unlock`, the secret word, a shared location, and finally a
//! rejected passphrase. Most rules also ping the supervisor chat.

use tracing::{debug, info};

use super::{Dispatcher, START_COMMAND};
use crate::core::config::HuntConfig;
use crate::core::models::{Action, Location, Message, Update};
use crate::utils::geo;

pub const UNLOCK_COMMAND: &str = "/unlock";

pub const INSTRUCTIONS_TEXT: &str = "Присылай мне свою локацию. Если ты будешь относительно близко к расположению подсказки, я дам тебе точные координаты!\nУ меня есть так же команда /unlock =)";
pub const PASSPHRASE_PROMPT: &str = "Пароль?";
pub const SUCCESS_TEXT: &str = "Молодец! Все верно!\nВ качестве приза могли прийти, но не пришли:\n1. Поездка в Австрию на викенд. Но она почему-то вводит локдаун.\n2. Поход на Щелкунчика. Но кто-то прощелкал все полимеры =(.\n3. Карты с покемонами на испанском. Но они у тебя уже есть.\n\n\n\nНо зато пришел: бессрочный recharge day on demand. Предложение отвезти тебя, куда ты захочешь, на 1 день. Используй его, когда тебе вздумается.";
pub const CHECK_PLACE_TEXT: &str = "Проверь это место";
pub const NO_HINTS_TEXT: &str = "Вблизи нет подсказок";
pub const WRONG_PASSPHRASE_TEXT: &str = "Этот пароль не подходит =(";

pub const SUPERVISOR_STARTED_TEXT: &str = "Соня начала искать локации!";
pub const SUPERVISOR_SOLVED_TEXT: &str = "Соня справилась!";

#[must_use]
pub fn supervisor_checking_text(index: usize) -> String {
    format!("Соня проверяет {index}!")
}

#[must_use]
pub fn supervisor_rejected_text(text: &str) -> String {
    format!("Соня ввела {text}!")
}

pub struct HuntDispatcher {
    config: HuntConfig,
}

impl HuntDispatcher {
    #[must_use]
    pub fn new(config: HuntConfig) -> Self {
        Self { config }
    }

    fn notify(&self, text: impl Into<String>) -> Action {
        Action::text(self.config.supervisor_chat_id, text)
    }

    /// Indexes of candidates within the geofence radius of `point`, in list order.
    #[must_use]
    pub fn nearby_candidates(&self, point: &Location) -> Vec<usize> {
        let matches: Vec<usize> = self
            .config
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| geo::within(candidate, point, self.config.geofence_radius_m))
            .map(|(idx, _)| idx)
            .collect();
        debug!(?matches, "Checked candidates");
        matches
    }

    fn location_actions(&self, chat_id: i64, point: &Location) -> Vec<Action> {
        let matches = self.nearby_candidates(point);
        if matches.is_empty() {
            return vec![Action::text(chat_id, NO_HINTS_TEXT)];
        }

        info!(chat_id, matches = ?matches, "Location is near hints");
        matches
            .into_iter()
            .flat_map(|idx| {
                [
                    Action::text(chat_id, CHECK_PLACE_TEXT),
                    self.notify(supervisor_checking_text(idx)),
                    Action::SendLocation {
                        chat_id,
                        location: self.config.candidates[idx],
                    },
                ]
            })
            .collect()
    }

    fn message_actions(&self, message: &Message) -> Vec<Action> {
        let chat_id = message.chat.id;
        let text = message.text();

        if text == START_COMMAND {
            return vec![
                Action::text(chat_id, INSTRUCTIONS_TEXT),
                self.notify(SUPERVISOR_STARTED_TEXT),
            ];
        }

        if text == UNLOCK_COMMAND {
            return vec![Action::text(chat_id, PASSPHRASE_PROMPT)];
        }

        if text.to_lowercase() == self.config.secret_word.to_lowercase() {
            return vec![
                Action::text(chat_id, SUCCESS_TEXT),
                self.notify(SUPERVISOR_SOLVED_TEXT),
            ];
        }

        if let Some(point) = &message.location
            && point.latitude > 0.0
        {
            return self.location_actions(chat_id, point);
        }

        vec![
            Action::text(chat_id, WRONG_PASSPHRASE_TEXT),
            self.notify(supervisor_rejected_text(text)),
        ]
    }
}

impl Dispatcher for HuntDispatcher {
    fn decide(&self, update: &Update) -> Vec<Action> {
        let Some(message) = &update.message else {
            return Vec::new();
        };

        if !self
            .config
            .allowed_users
            .contains(message.chat.username.as_deref())
        {
            info!(chat_id = message.chat.id, "Ignoring chat outside allow-list");
            return Vec::new();
        }

        self.message_actions(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Chat;

    fn message(text: Option<&str>, location: Option<Location>) -> Update {
        Update {
            update_id: 1,
            message: Some(Message {
                message_id: 1,
                text: text.map(ToString::to_string),
                chat: Chat {
                    id: 42,
                    username: Some("sonicfelidae".into()),
                },
                location,
                ..Default::default()
            }),
            callback_query: None,
        }
    }

    fn dispatcher() -> HuntDispatcher {
        HuntDispatcher::new(HuntConfig::default())
    }

    #[test]
    fn unlock_prompts_for_passphrase() {
        assert_eq!(
            dispatcher().decide(&message(Some("/unlock"), None)),
            vec![Action::text(42, PASSPHRASE_PROMPT)]
        );
    }

    #[test]
    fn secret_word_ignores_case() {
        for word in ["AFSIO", "afsio", "AfSiO"] {
            let actions = dispatcher().decide(&message(Some(word), None));
            assert_eq!(
                actions,
                vec![
                    Action::text(42, SUCCESS_TEXT),
                    Action::text(49_208_041, SUPERVISOR_SOLVED_TEXT),
                ],
                "word {word}"
            );
        }
    }

    #[test]
    fn wrong_passphrase_quotes_text_to_supervisor() {
        let actions = dispatcher().decide(&message(Some("open sesame"), None));
        assert_eq!(
            actions,
            vec![
                Action::text(42, WRONG_PASSPHRASE_TEXT),
                Action::text(49_208_041, "Соня ввела open sesame!"),
            ]
        );
    }

    #[test]
    fn far_location_has_no_hints() {
        let actions = dispatcher().decide(&message(None, Some(Location::new(52.52, 13.405))));
        assert_eq!(actions, vec![Action::text(42, NO_HINTS_TEXT)]);
    }

    #[test]
    fn southern_location_falls_through_to_rejection() {
        let actions = dispatcher().decide(&message(None, Some(Location::new(-33.86, 151.2))));
        assert_eq!(actions[0], Action::text(42, WRONG_PASSPHRASE_TEXT));
    }

    #[test]
    fn overlapping_geofences_each_fan_out() {
        // Nymphenburg and the west candidate are ~400 m apart.
        let point = Location::new(48.157_3, 11.492_1);
        let d = dispatcher();
        assert_eq!(d.nearby_candidates(&point), vec![0, 1]);

        let actions = d.decide(&message(None, Some(point)));
        assert_eq!(actions.len(), 6);
        assert_eq!(actions[1], Action::text(49_208_041, "Соня проверяет 0!"));
        assert_eq!(actions[4], Action::text(49_208_041, "Соня проверяет 1!"));
    }

    #[test]
    fn no_message_means_no_action() {
        let update = Update {
            update_id: 5,
            ..Default::default()
        };
        assert!(dispatcher().decide(&update).is_empty());
    }
}
