//! Theme palette and role resolution
//!
//! A theme is two flat maps: color roles to color values and font roles to
//! font families. Lookups never fail. A missing role falls back to the
//! theme's `primary` entry of the same kind, and then to a built-in value.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Color used when neither the requested role nor `primary` is mapped
pub const FALLBACK_COLOR: &str = "#000000";

/// Font used when neither the requested role nor `primary` is mapped
pub const FALLBACK_FONT: &str = "sans-serif";

/// Semantic color role
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorRole {
    Primary,
    Secondary,
    Tertiary,
    Quaternary,
}

/// Semantic font role
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FontRole {
    Primary,
    Secondary,
}

/// Unknown role name in a deck file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    pub name: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme role '{}'", self.name)
    }
}

impl std::error::Error for ParseRoleError {}

impl ColorRole {
    pub const ALL: [ColorRole; 4] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Tertiary,
        ColorRole::Quaternary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Quaternary => "quaternary",
        }
    }
}

impl FromStr for ColorRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            "tertiary" => Ok(Self::Tertiary),
            // Spectacle-era themes spell it this way
            "quaternary" | "quartenary" => Ok(Self::Quaternary),
            _ => Err(ParseRoleError { name: s.to_string() }),
        }
    }
}

impl FontRole {
    pub const ALL: [FontRole; 2] = [FontRole::Primary, FontRole::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl FromStr for FontRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            _ => Err(ParseRoleError { name: s.to_string() }),
        }
    }
}

macro_rules! role_string_conversions {
    ($role:ty) => {
        impl fmt::Display for $role {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $role {
            type Error = ParseRoleError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$role> for String {
            fn from(role: $role) -> Self {
                role.as_str().to_string()
            }
        }
    };
}

role_string_conversions!(ColorRole);
role_string_conversions!(FontRole);

/// A role lookup that had to fall back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedThemeRole {
    /// "color" or "font"
    pub category: &'static str,
    /// The role that was requested
    pub role: String,
    /// The value used instead
    pub fallback: String,
}

impl fmt::Display for UnresolvedThemeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} role '{}' is not defined by the theme, using '{}'",
            self.category, self.role, self.fallback
        )
    }
}

/// Result of a theme lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub value: &'a str,
    /// Set when the requested role was missing
    pub warning: Option<UnresolvedThemeRole>,
}

impl Resolved<'_> {
    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}

/// Color and font palette
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "unique_roles")]
    pub colors: BTreeMap<ColorRole, String>,
    #[serde(deserialize_with = "unique_roles")]
    pub fonts: BTreeMap<FontRole, String>,
}

impl Theme {
    /// Create an empty theme; every lookup falls back
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a color role
    pub fn with_color(mut self, role: ColorRole, value: impl Into<String>) -> Self {
        self.colors.insert(role, value.into());
        self
    }

    /// Set a font role
    pub fn with_font(mut self, role: FontRole, family: impl Into<String>) -> Self {
        self.fonts.insert(role, family.into());
        self
    }

    /// Resolve a color role
    pub fn resolve_color(&self, role: ColorRole) -> Resolved<'_> {
        resolve(
            &self.colors,
            role,
            ColorRole::Primary,
            FALLBACK_COLOR,
            "color",
        )
    }

    /// Resolve a font role
    pub fn resolve_font(&self, role: FontRole) -> Resolved<'_> {
        resolve(&self.fonts, role, FontRole::Primary, FALLBACK_FONT, "font")
    }
}

fn resolve<'a, R>(
    map: &'a BTreeMap<R, String>,
    role: R,
    primary: R,
    builtin: &'static str,
    category: &'static str,
) -> Resolved<'a>
where
    R: Ord + fmt::Display,
{
    if let Some(value) = map.get(&role) {
        return Resolved {
            value: value.as_str(),
            warning: None,
        };
    }

    let value = map.get(&primary).map(String::as_str).unwrap_or(builtin);
    Resolved {
        value,
        warning: Some(UnresolvedThemeRole {
            category,
            role: role.to_string(),
            fallback: value.to_string(),
        }),
    }
}

/// Role table that rejects a role given twice, e.g. under both
/// `quaternary` and `quartenary`
fn unique_roles<'de, D, R>(deserializer: D) -> Result<BTreeMap<R, String>, D::Error>
where
    D: Deserializer<'de>,
    R: Deserialize<'de> + Ord + fmt::Display,
{
    struct RoleTable<R>(PhantomData<R>);

    impl<'de, R> Visitor<'de> for RoleTable<R>
    where
        R: Deserialize<'de> + Ord + fmt::Display,
    {
        type Value = BTreeMap<R, String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of theme roles")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut roles = BTreeMap::new();
            while let Some((role, value)) = access.next_entry::<R, String>()? {
                let name = role.to_string();
                if roles.insert(role, value).is_some() {
                    return Err(de::Error::custom(format!(
                        "theme role '{}' is set more than once",
                        name
                    )));
                }
            }
            Ok(roles)
        }
    }

    deserializer.deserialize_map(RoleTable(PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme::new()
            .with_color(ColorRole::Primary, "white")
            .with_color(ColorRole::Secondary, "#1F2022")
            .with_font(FontRole::Primary, "Montserrat")
    }

    #[test]
    fn test_present_role_resolves_exactly() {
        let theme = theme();
        let color = theme.resolve_color(ColorRole::Secondary);
        assert_eq!(color.value, "#1F2022");
        assert!(!color.is_fallback());

        let font = theme.resolve_font(FontRole::Primary);
        assert_eq!(font.value, "Montserrat");
        assert!(font.warning.is_none());
    }

    #[test]
    fn test_missing_role_falls_back_to_primary() {
        let theme = theme();
        let color = theme.resolve_color(ColorRole::Tertiary);
        assert_eq!(color.value, "white");
        let warning = color.warning.unwrap();
        assert_eq!(warning.role, "tertiary");
        assert_eq!(warning.fallback, "white");
        assert!(warning.to_string().contains("tertiary"));

        let font = theme.resolve_font(FontRole::Secondary);
        assert_eq!(font.value, "Montserrat");
        assert!(font.is_fallback());
    }

    #[test]
    fn test_empty_theme_uses_builtin() {
        let theme = Theme::new();
        assert_eq!(theme.resolve_color(ColorRole::Primary).value, FALLBACK_COLOR);
        assert_eq!(theme.resolve_font(FontRole::Secondary).value, FALLBACK_FONT);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Tertiary".parse::<ColorRole>(), Ok(ColorRole::Tertiary));
        assert_eq!("quartenary".parse::<ColorRole>(), Ok(ColorRole::Quaternary));
        assert!("accent".parse::<ColorRole>().is_err());
        assert!("tertiary".parse::<FontRole>().is_err());
    }

    #[test]
    fn test_theme_from_toml() {
        let toml_src = r##"
[colors]
primary = "white"
secondary = "#1F2022"
quartenary = "#CECECE"

[fonts]
secondary = "Helvetica"
"##;
        let theme: Theme = toml::from_str(toml_src).unwrap();
        assert_eq!(theme.colors.len(), 3);
        assert_eq!(theme.resolve_color(ColorRole::Quaternary).value, "#CECECE");
        assert_eq!(theme.resolve_font(FontRole::Secondary).value, "Helvetica");
    }

    #[test]
    fn test_theme_rejects_duplicate_role() {
        let toml_src = r##"
[colors]
quaternary = "#CECECE"
quartenary = "#DDDDDD"
"##;
        let err = toml::from_str::<Theme>(toml_src).unwrap_err();
        assert!(err.to_string().contains("theme role 'quaternary' is set more than once"));

        let fonts = "[fonts]\nprimary = \"A\"\nPrimary = \"B\"\n";
        let err = toml::from_str::<Theme>(fonts).unwrap_err();
        assert!(err.to_string().contains("'primary'"));
    }

    #[test]
    fn test_theme_rejects_unknown_role() {
        let result: Result<Theme, _> = toml::from_str("[colors]\naccent = \"red\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_theme_json_keys() {
        let json = serde_json::to_string(&theme()).unwrap();
        assert!(json.contains("\"primary\":\"white\""));
    }
}
