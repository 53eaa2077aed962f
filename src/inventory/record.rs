//! Parsing of individual inventory records.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// `name domain:role priority location display-name`
///
/// The name is matched lazily so names containing spaces still leave the
/// role, priority, and location columns intact.
static RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\S*:\S*)\s+(-?\d+)\s+(\S+)\s+(.*)$").expect("record pattern is valid")
});

/// One decoded inventory line, borrowing from the line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord<'a> {
    pub name: &'a str,
    pub domain: &'a str,
    pub role: &'a str,
    pub priority: i64,
    pub location: &'a str,
    pub display_name: &'a str,
}

impl<'a> InventoryRecord<'a> {
    /// Tokenize a record line. Returns `None` for lines that do not fit the layout.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = RECORD_RE.captures(line.trim_end())?;

        let name = caps.get(1)?.as_str();
        let (domain, role) = caps.get(2)?.as_str().split_once(':')?;
        let priority = caps.get(3)?.as_str().parse().ok()?;
        let location = caps.get(4)?.as_str();
        let display_name = caps.get(5)?.as_str();

        Some(Self {
            name,
            domain,
            role,
            priority,
            location,
            display_name,
        })
    }

    /// Role after normalization: `std:doc` pages are addressed as labels.
    pub fn effective_role(&self) -> &'a str {
        if self.domain == "std" && self.role == "doc" {
            "label"
        } else {
            self.role
        }
    }

    /// Location with a trailing `$` expanded to the record name.
    pub fn expanded_location(&self) -> Cow<'a, str> {
        match self.location.strip_suffix('$') {
            Some(stem) => Cow::Owned(format!("{}{}", stem, self.name)),
            None => Cow::Borrowed(self.location),
        }
    }

    /// The display name, or the name when the display column is `-`.
    pub fn label(&self) -> &'a str {
        if self.display_name == "-" {
            self.name
        } else {
            self.display_name
        }
    }

    pub fn is_python_module(&self) -> bool {
        self.domain == "py" && self.role == "module"
    }
}
