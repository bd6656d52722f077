/// Primary and secondary colours for a team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamColors {
    pub primary: &'static str,
    pub secondary: &'static str,
}

pub const PLACEHOLDER_COLORS: TeamColors = TeamColors {
    primary: "#000000",
    secondary: "#ffffff",
};

/// Map a team code or name to its colours.
///
/// Accepts short codes ("IND") and full names ("India"), case-insensitive.
/// Unknown teams get placeholder colours.
pub fn team_colors(code_or_name: &str) -> TeamColors {
    let key = code_or_name.trim().to_uppercase();
    let (primary, secondary) = match key.as_str() {
        "IND" | "INDIA" => ("#0066b3", "#ff9933"),
        "AUS" | "AUSTRALIA" => ("#ffcc00", "#006400"),
        "ENG" | "ENGLAND" => ("#002147", "#cf142b"),
        "PAK" | "PAKISTAN" => ("#006400", "#ffffff"),
        "SA" | "RSA" | "SOUTH AFRICA" => ("#006400", "#ffc72c"),
        "NZ" | "NEW ZEALAND" => ("#000000", "#ffffff"),
        "WI" | "WEST INDIES" => ("#7b0041", "#ffc72c"),
        "SL" | "SRI LANKA" => ("#0a2351", "#ffbe29"),
        "BAN" | "BANGLADESH" => ("#006a4e", "#f42a41"),
        "AFG" | "AFGHANISTAN" => ("#0066ff", "#d32011"),
        "IRE" | "IRELAND" => ("#169b62", "#ffffff"),
        "ZIM" | "ZIMBABWE" => ("#d40000", "#fcd116"),
        _ => return PLACEHOLDER_COLORS,
    };
    TeamColors { primary, secondary }
}
