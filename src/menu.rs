use crate::prompt::InputError;

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    FlightById,
    FlightsByDate,
    DelayedByAirline,
    DelayedByAirport,
    Exit,
}

impl MenuOption {
    /// All options in display order.
    pub const ALL: [MenuOption; 5] = [
        MenuOption::FlightById,
        MenuOption::FlightsByDate,
        MenuOption::DelayedByAirline,
        MenuOption::DelayedByAirport,
        MenuOption::Exit,
    ];

    /// The number a user types to select this option.
    pub fn number(self) -> u32 {
        match self {
            MenuOption::FlightById => 1,
            MenuOption::FlightsByDate => 2,
            MenuOption::DelayedByAirline => 3,
            MenuOption::DelayedByAirport => 4,
            MenuOption::Exit => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::FlightById => "Show flight by ID",
            MenuOption::FlightsByDate => "Show flights by date",
            MenuOption::DelayedByAirline => "Delayed flights by airline",
            MenuOption::DelayedByAirport => "Delayed flights by origin airport",
            MenuOption::Exit => "Exit",
        }
    }

    pub fn from_number(number: u32) -> Option<MenuOption> {
        MenuOption::ALL.iter().copied().find(|option| option.number() == number)
    }
}

/// Renders the menu block printed before every selection prompt.
pub fn render_menu() -> String {
    let mut menu = String::from("\nMenu:\n");
    for option in MenuOption::ALL {
        menu.push_str(&format!("{}. {}\n", option.number(), option.label()));
    }
    menu
}

/// Parses a menu selection. Anything that is not one of the listed numbers is rejected.
pub fn parse_choice(input: &str) -> Result<MenuOption, InputError> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(MenuOption::from_number)
        .ok_or(InputError::UnknownChoice)
}
