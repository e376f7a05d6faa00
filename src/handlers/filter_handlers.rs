use minibadge_core::{Session, ViewReconciler};
use tracing::debug;

use super::commands::{ShellCommand, HELP};

/// Whether the shell keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one command against the session. Every filtering command triggers a
/// full recomputation and view update before returning.
pub fn handle_command<V>(session: &mut Session, command: ShellCommand, view: &mut V) -> Flow
where
    V: ViewReconciler + ?Sized,
{
    debug!(?command, "handling command");

    match command {
        ShellCommand::Search(query) => session.set_search(query, view),
        ShellCommand::Facet(facet, value) => session.set_facet(facet, value, view),
        ShellCommand::Sort(spec) => session.set_sort(spec, view),
        ShellCommand::Clear => session.clear(view),
        ShellCommand::Show => session.render(view),
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => return Flow::Quit,
    }

    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::commands::parse_command;
    use minibadge_core::{Facet, Item, ItemStore, ViewSnapshot};

    fn session() -> Session {
        let items = ["Game", "Tool", "Game"]
            .iter()
            .enumerate()
            .map(|(i, category)| Item {
                title: format!("badge {}", i + 1),
                category: category.to_string(),
                timestamp: format!("2024-01-0{}", i + 1),
                ..Default::default()
            })
            .collect();
        Session::new(ItemStore::new(items))
    }

    fn run(session: &mut Session, view: &mut ViewSnapshot, line: &str) -> Flow {
        let command = parse_command(line).unwrap().unwrap();
        handle_command(session, command, view)
    }

    #[test]
    fn test_commands_drive_session() {
        let mut session = session();
        let mut view = ViewSnapshot::default();

        run(&mut session, &mut view, "category Game");
        assert_eq!(view.titles(), vec!["badge 3", "badge 1"]);

        run(&mut session, &mut view, "sort title:asc");
        assert_eq!(view.titles(), vec!["badge 1", "badge 3"]);

        run(&mut session, &mut view, "category");
        assert_eq!(view.visible, 3);
        assert_eq!(view.facet(Facet::Category).selected, "");
    }

    #[test]
    fn test_clear_and_quit() {
        let mut session = session();
        let mut view = ViewSnapshot::default();
        run(&mut session, &mut view, "search tool");
        assert_eq!(view.visible, 1);

        assert_eq!(run(&mut session, &mut view, "clear"), Flow::Continue);
        assert_eq!(view.visible, 3);
        assert_eq!(run(&mut session, &mut view, "quit"), Flow::Quit);
    }
}
