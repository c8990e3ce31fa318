// Screen state machine: which view is active and how navigation moves between them
// Transitions are pure; side effects (new session, saving a score) belong to the caller

use crate::xtm_score::MAX_NAME_LEN;

/// Name prompt shown once a game ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePrompt {
    pub victory: bool,
    pub score: u64,
    pub elapsed_secs: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    NameEntry(NamePrompt),
    Scores,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nav {
    Play,
    Restart,
    OpenScores,
    Back,
    Finished {
        victory: bool,
        score: u64,
        elapsed_secs: u64,
    },
    TypeChar(char),
    Backspace,
    SubmitName,
    Quit,
}

/// Next screen for `nav`; pairs that make no sense keep the current screen
pub fn transition(screen: Screen, nav: Nav) -> Screen {
    match (screen, nav) {
        (_, Nav::Quit) => Screen::Exit,
        (Screen::Menu, Nav::Play) => Screen::Playing,
        (Screen::Menu, Nav::OpenScores) => Screen::Scores,
        (Screen::Playing, Nav::Restart) => Screen::Playing,
        (Screen::Playing, Nav::Back) | (Screen::Scores, Nav::Back) => Screen::Menu,
        (
            Screen::Playing,
            Nav::Finished {
                victory,
                score,
                elapsed_secs,
            },
        ) => Screen::NameEntry(NamePrompt {
            victory,
            score,
            elapsed_secs,
            name: String::new(),
        }),
        (Screen::NameEntry(mut prompt), Nav::TypeChar(ch)) => {
            if !ch.is_control() && ch != ',' && prompt.name.chars().count() < MAX_NAME_LEN {
                prompt.name.push(ch);
            }
            Screen::NameEntry(prompt)
        }
        (Screen::NameEntry(mut prompt), Nav::Backspace) => {
            prompt.name.pop();
            Screen::NameEntry(prompt)
        }
        (Screen::NameEntry(_), Nav::SubmitName) | (Screen::NameEntry(_), Nav::Back) => Screen::Menu,
        (screen, _) => screen,
    }
}

/// Buttons on the main menu, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Difficulty,
    Scores,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [MenuItem::Play, MenuItem::Difficulty, MenuItem::Scores, MenuItem::Exit];

    pub fn index(self) -> usize {
        match self {
            MenuItem::Play => 0,
            MenuItem::Difficulty => 1,
            MenuItem::Scores => 2,
            MenuItem::Exit => 3,
        }
    }

    pub fn next(self) -> MenuItem {
        MenuItem::ALL[(self.index() + 1) % MenuItem::ALL.len()]
    }

    pub fn prev(self) -> MenuItem {
        MenuItem::ALL[(self.index() + MenuItem::ALL.len() - 1) % MenuItem::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt_screen() -> Screen {
        transition(
            Screen::Playing,
            Nav::Finished {
                victory: true,
                score: 20,
                elapsed_secs: 50,
            },
        )
    }

    #[test]
    fn menu_navigation() {
        assert_eq!(transition(Screen::Menu, Nav::Play), Screen::Playing);
        assert_eq!(transition(Screen::Menu, Nav::OpenScores), Screen::Scores);
        assert_eq!(transition(Screen::Scores, Nav::Back), Screen::Menu);
        assert_eq!(transition(Screen::Playing, Nav::Back), Screen::Menu);
        assert_eq!(transition(Screen::Playing, Nav::Restart), Screen::Playing);
        assert_eq!(transition(Screen::Scores, Nav::Quit), Screen::Exit);
    }

    #[test]
    fn unrelated_events_keep_screen() {
        assert_eq!(transition(Screen::Menu, Nav::Back), Screen::Menu);
        assert_eq!(transition(Screen::Scores, Nav::Play), Screen::Scores);
        assert_eq!(transition(Screen::Menu, Nav::TypeChar('a')), Screen::Menu);
    }

    #[test]
    fn finished_game_opens_name_prompt() {
        match prompt_screen() {
            Screen::NameEntry(p) => {
                assert!(p.victory);
                assert_eq!((p.score, p.elapsed_secs), (20, 50));
                assert!(p.name.is_empty());
            }
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[test]
    fn name_is_limited_to_fifteen_printable_chars() {
        let mut screen = prompt_screen();
        for ch in "abcdefghijklmnopqrst".chars() {
            screen = transition(screen, Nav::TypeChar(ch));
        }
        screen = transition(screen, Nav::TypeChar('\n'));
        screen = transition(screen, Nav::Backspace);
        match &screen {
            Screen::NameEntry(p) => assert_eq!(p.name, "abcdefghijklmn"),
            other => panic!("unexpected screen {:?}", other),
        }
        assert_eq!(transition(screen, Nav::SubmitName), Screen::Menu);
    }

    #[test]
    fn menu_items_wrap() {
        assert_eq!(MenuItem::Exit.next(), MenuItem::Play);
        assert_eq!(MenuItem::Play.prev(), MenuItem::Exit);
        assert_eq!(MenuItem::Difficulty.next(), MenuItem::Scores);
        assert_eq!(MenuItem::ALL[MenuItem::Scores.index()], MenuItem::Scores);
    }
}
