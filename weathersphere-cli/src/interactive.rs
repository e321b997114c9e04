use std::fmt;

use chrono::Local;
use inquire::{InquireError, Select, Text};
use weathersphere_core::{DisplayState, UiEvent, WeatherProvider, WeatherWidget};

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuItem {
    Search,
    Recent(String),
    ShowRecent,
    HideRecent,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Search => f.write_str("Search a city"),
            MenuItem::Recent(city) => write!(f, "  {city}"),
            MenuItem::ShowRecent => f.write_str("Recent searches"),
            MenuItem::HideRecent => f.write_str("Hide recent searches"),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

/// Recent cities are only clickable while the sidebar is open.
fn menu(state: &DisplayState) -> Vec<MenuItem> {
    let mut items = vec![MenuItem::Search];

    if state.sidebar_visible {
        items.extend(state.recent.iter().map(|city| MenuItem::Recent(city.to_string())));
        items.push(MenuItem::HideRecent);
    } else {
        items.push(MenuItem::ShowRecent);
    }

    items.push(MenuItem::Quit);
    items
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

pub async fn run<P: WeatherProvider>(widget: &WeatherWidget<P>) -> anyhow::Result<()> {
    loop {
        let state = widget.display().await;
        println!("{}", render::render(&state, Local::now().date_naive()));

        let choice = match Select::new("What next?", menu(&state)).prompt() {
            Ok(choice) => choice,
            Err(err) if is_cancel(&err) => break,
            Err(err) => return Err(err.into()),
        };

        match choice {
            MenuItem::Search => {
                let query = match Text::new("City:")
                    .with_placeholder("Type a city and hit Enter...")
                    .with_initial_value(&state.query)
                    .prompt()
                {
                    Ok(query) => query,
                    Err(err) if is_cancel(&err) => continue,
                    Err(err) => return Err(err.into()),
                };

                widget.handle(UiEvent::QueryChanged(query)).await;
                widget.handle(UiEvent::Submit).await;
            }
            MenuItem::Recent(city) => {
                widget.handle(UiEvent::RecentCityClicked(city)).await;
            }
            MenuItem::ShowRecent => {
                widget.handle(UiEvent::ToggleSidebar(true)).await;
            }
            MenuItem::HideRecent => {
                widget.handle(UiEvent::ToggleSidebar(false)).await;
            }
            MenuItem::Quit => break,
        }
    }

    Ok(())
}
