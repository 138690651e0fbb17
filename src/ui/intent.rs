use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Position, Rect};

/// What a user gesture asks the widget to do. Derived once per event by
/// the dispatch functions below; the controller never inspects raw events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Open a card's article link in the system browser.
    OpenArticle { index: usize },
    /// Open the author overlay for a card.
    OpenAuthor { index: usize },
    LoadMore,
    /// Trigger a random re-roll.
    Reroll,
    /// Open the currently caught article.
    OpenRandomArticle,
    /// Open the author overlay for the currently caught article.
    OpenRandomAuthor,
    /// Gamified variant: a caught-article click feeds the hunger cure.
    RecordClick,
    SelectUp,
    SelectDown,
    CloseModal,
    Quit,
}

#[derive(Debug, Clone, Copy)]
pub struct DispatchContext {
    pub selected_article: usize,
    pub modal_open: bool,
    pub fishing: bool,
}

/// Keyboard dispatch table. With the overlay open, every activation
/// gesture collapses to dismissal, mirroring click-outside.
pub fn intents_for_key(key: KeyEvent, ctx: DispatchContext) -> Vec<Intent> {
    if ctx.modal_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => vec![Intent::CloseModal],
            _ => Vec::new(),
        };
    }

    match key.code {
        KeyCode::Char('q') => vec![Intent::Quit],
        KeyCode::Up | KeyCode::Char('k') => vec![Intent::SelectUp],
        KeyCode::Down | KeyCode::Char('j') => vec![Intent::SelectDown],
        KeyCode::Enter | KeyCode::Char('o') => {
            let mut intents = vec![Intent::OpenArticle {
                index: ctx.selected_article,
            }];
            if ctx.fishing {
                intents.push(Intent::RecordClick);
            }
            intents
        }
        KeyCode::Char('a') => vec![Intent::OpenAuthor {
            index: ctx.selected_article,
        }],
        KeyCode::Char('m') | KeyCode::Char('l') => vec![Intent::LoadMore],
        KeyCode::Char('r') => vec![Intent::Reroll],
        KeyCode::Char('p') => {
            let mut intents = vec![Intent::OpenRandomArticle];
            if ctx.fishing {
                intents.push(Intent::RecordClick);
            }
            intents
        }
        KeyCode::Char('u') => vec![Intent::OpenRandomAuthor],
        _ => Vec::new(),
    }
}

/// Interactive region of one rendered card.
#[derive(Debug, Clone, Copy)]
pub struct CardZone {
    pub index: usize,
    pub title: Rect,
    pub author: Rect,
}

/// Hit zones captured during the last draw. The single mouse handler
/// tests against these, so cards inserted later need no extra wiring.
#[derive(Debug, Clone, Default)]
pub struct LayoutMap {
    pub random_header: Option<Rect>,
    pub random_title: Option<Rect>,
    pub random_author: Option<Rect>,
    pub cards: Vec<CardZone>,
    pub load_more: Option<Rect>,
    pub modal: Option<Rect>,
}

fn hit(zone: Option<Rect>, position: Position) -> bool {
    zone.is_some_and(|rect| rect.contains(position))
}

/// Mouse dispatch table; branches are evaluated independently, so one
/// click may yield several intents when nested targets match.
pub fn intents_for_mouse(
    column: u16,
    row: u16,
    layout: &LayoutMap,
    fishing: bool,
) -> Vec<Intent> {
    let position = Position::new(column, row);

    // The overlay swallows every click: inside is inert, outside dismisses.
    if let Some(modal) = layout.modal {
        return if modal.contains(position) {
            Vec::new()
        } else {
            vec![Intent::CloseModal]
        };
    }

    let mut intents = Vec::new();

    for zone in &layout.cards {
        if zone.title.contains(position) {
            intents.push(Intent::OpenArticle { index: zone.index });
            if fishing {
                intents.push(Intent::RecordClick);
            }
        }
        if zone.author.contains(position) {
            intents.push(Intent::OpenAuthor { index: zone.index });
        }
    }

    if hit(layout.load_more, position) {
        intents.push(Intent::LoadMore);
    }

    if hit(layout.random_header, position) {
        intents.push(Intent::Reroll);
    }

    if hit(layout.random_title, position) {
        intents.push(Intent::OpenRandomArticle);
        if fishing {
            intents.push(Intent::RecordClick);
        }
    }

    if hit(layout.random_author, position) {
        intents.push(Intent::OpenRandomAuthor);
    }

    intents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctx(fishing: bool) -> DispatchContext {
        DispatchContext {
            selected_article: 3,
            modal_open: false,
            fishing,
        }
    }

    #[test]
    fn test_enter_opens_selection_and_counts_click() {
        let intents = intents_for_key(key(KeyCode::Enter), ctx(true));
        assert_eq!(
            intents,
            vec![Intent::OpenArticle { index: 3 }, Intent::RecordClick]
        );
    }

    #[test]
    fn test_plain_variant_does_not_count_clicks() {
        let intents = intents_for_key(key(KeyCode::Enter), ctx(false));
        assert_eq!(intents, vec![Intent::OpenArticle { index: 3 }]);
    }

    #[test]
    fn test_modal_swallows_keys() {
        let mut context = ctx(true);
        context.modal_open = true;
        assert_eq!(
            intents_for_key(key(KeyCode::Esc), context),
            vec![Intent::CloseModal]
        );
        assert!(intents_for_key(key(KeyCode::Char('r')), context).is_empty());
    }

    #[test]
    fn test_quit() {
        assert_eq!(intents_for_key(key(KeyCode::Char('q')), ctx(true)), vec![Intent::Quit]);
    }

    fn sample_layout() -> LayoutMap {
        LayoutMap {
            random_header: Some(Rect::new(0, 5, 40, 1)),
            random_title: Some(Rect::new(1, 8, 38, 1)),
            random_author: Some(Rect::new(1, 7, 38, 1)),
            cards: vec![
                CardZone {
                    index: 0,
                    title: Rect::new(1, 11, 38, 1),
                    author: Rect::new(1, 12, 38, 1),
                },
                CardZone {
                    index: 1,
                    title: Rect::new(1, 13, 38, 1),
                    author: Rect::new(1, 14, 38, 1),
                },
            ],
            load_more: Some(Rect::new(0, 20, 40, 1)),
            modal: None,
        }
    }

    #[test]
    fn test_mouse_on_card_title_opens_and_counts() {
        let intents = intents_for_mouse(5, 13, &sample_layout(), true);
        assert_eq!(
            intents,
            vec![Intent::OpenArticle { index: 1 }, Intent::RecordClick]
        );
    }

    #[test]
    fn test_mouse_on_card_author_opens_modal_only() {
        let intents = intents_for_mouse(5, 12, &sample_layout(), true);
        assert_eq!(intents, vec![Intent::OpenAuthor { index: 0 }]);
    }

    #[test]
    fn test_mouse_on_load_more() {
        let intents = intents_for_mouse(3, 20, &sample_layout(), true);
        assert_eq!(intents, vec![Intent::LoadMore]);
    }

    #[test]
    fn test_mouse_on_random_header_rerolls() {
        let intents = intents_for_mouse(10, 5, &sample_layout(), true);
        assert_eq!(intents, vec![Intent::Reroll]);
    }

    #[test]
    fn test_mouse_outside_modal_dismisses() {
        let mut layout = sample_layout();
        layout.modal = Some(Rect::new(10, 10, 20, 8));

        assert_eq!(
            intents_for_mouse(0, 0, &layout, true),
            vec![Intent::CloseModal]
        );
        // Inside the overlay nothing fires, even over a card zone.
        assert!(intents_for_mouse(12, 12, &layout, true).is_empty());
    }

    #[test]
    fn test_mouse_on_dead_space_yields_nothing() {
        assert!(intents_for_mouse(0, 3, &sample_layout(), true).is_empty());
    }
}
