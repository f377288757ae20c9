//! External collaborator lookups and identities.
//!
//! Authentication, salon profiles, and menu management live outside this
//! core; what the booking service needs from them is narrow: an
//! authenticated principal per request, opening hours per salon, and menu
//! items by id. This module defines those seams as traits so the service
//! takes explicitly constructed handles instead of reaching for globals,
//! plus a static in-memory implementation for tests and the CLI.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::{MenuId, SalonId, UserId};
use crate::slot::OpeningHours;

/// Role of an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A customer booking for themselves.
    User,
    /// A salon operator acting for their salon.
    Salon,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Salon => f.write_str("salon"),
        }
    }
}

/// An authenticated identity supplied by the auth collaborator.
///
/// The booking service trusts this identity and performs no credential
/// checks of its own. For `Role::User` the id is a user id; for
/// `Role::Salon` it is the operated salon's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// The principal's identifier in its role's id space.
    pub id: i64,
    /// The principal's role.
    pub role: Role,
}

impl Principal {
    /// A customer principal.
    #[must_use]
    pub const fn user(id: UserId) -> Self {
        Self {
            id: id.value(),
            role: Role::User,
        }
    }

    /// A salon operator principal.
    #[must_use]
    pub const fn salon(id: SalonId) -> Self {
        Self {
            id: id.value(),
            role: Role::Salon,
        }
    }

    /// The principal's id as a user id.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::new(self.id)
    }

    /// The principal's id as a salon id.
    #[must_use]
    pub const fn salon_id(&self) -> SalonId {
        SalonId::new(self.id)
    }
}

/// A salon as the salon collaborator exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salon {
    /// The salon identifier.
    pub id: SalonId,
    /// Display name.
    pub name: String,
    /// Weekly opening schedule.
    #[serde(default)]
    pub hours: OpeningHours,
}

/// A menu item as the menu collaborator exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// The menu item identifier.
    pub id: MenuId,
    /// The owning salon.
    pub salon_id: SalonId,
    /// Display name.
    pub name: String,
    /// Service duration in minutes.
    pub duration_minutes: u32,
    /// Price in the salon's currency unit.
    pub price: u32,
}

/// Lookup of salons and their opening hours.
pub trait SalonDirectory {
    /// Returns the salon for the given id, `None` when unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing collaborator fails.
    fn salon(&self, id: SalonId) -> Result<Option<Salon>>;
}

/// Lookup of salon menu items.
pub trait MenuDirectory {
    /// Returns the menu item for the given id, `None` when unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing collaborator fails.
    fn menu_item(&self, id: MenuId) -> Result<Option<MenuItem>>;
}

/// In-memory directory backed by a YAML document.
///
/// Serves as the collaborator stand-in for tests and the CLI.
///
/// # Examples
///
/// ```
/// use yoyaku::{MenuDirectory, MenuId, StaticDirectory};
///
/// let yaml = r#"
/// salons:
///   - id: 1
///     name: Cut & Color Ginza
///     hours:
///       monday: { start: "09:00", end: "18:00" }
/// menus:
///   - id: 10
///     salon_id: 1
///     name: Cut
///     duration_minutes: 30
///     price: 4500
/// "#;
/// let directory = StaticDirectory::from_yaml_str(yaml).unwrap();
/// let menu = directory.menu_item(MenuId::new(10)).unwrap().unwrap();
/// assert_eq!(menu.name, "Cut");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticDirectory {
    /// The known salons.
    #[serde(default)]
    pub salons: Vec<Salon>,
    /// The known menu items.
    #[serde(default)]
    pub menus: Vec<MenuItem>,
}

impl StaticDirectory {
    /// Creates a directory from salon and menu lists.
    #[must_use]
    pub const fn new(salons: Vec<Salon>, menus: Vec<MenuItem>) -> Self {
        Self { salons, menus }
    }

    /// Parses a directory from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a directory from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

impl SalonDirectory for StaticDirectory {
    fn salon(&self, id: SalonId) -> Result<Option<Salon>> {
        Ok(self.salons.iter().find(|salon| salon.id == id).cloned())
    }
}

impl MenuDirectory for StaticDirectory {
    fn menu_item(&self, id: MenuId) -> Result<Option<MenuItem>> {
        Ok(self.menus.iter().find(|menu| menu.id == id).cloned())
    }
}
