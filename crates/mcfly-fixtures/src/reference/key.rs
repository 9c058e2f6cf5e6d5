//! Reference keys.
//!
//! A key pairs a class name with a local name so that two classes can both
//! use short names like `"1"` or `"default"` without colliding.

use std::fmt;

/// Literal local name given to the first entity saved in a context.
pub const DEFAULT_NAME: &str = "default";

/// Local part of a reference key.
///
/// Strings are normalised on conversion: `"default"` becomes
/// [`LocalName::Default`] and canonical decimal strings (`"0"`, `"42"`, no
/// leading zeros, within `u64`) become [`LocalName::Index`]. Other digit
/// strings such as `"05"` stay [`LocalName::Named`] but still count as
/// numeric. [`ReferenceKey::new`] applies the same normalisation to values
/// built from the variants directly, so two names that render to the same
/// text always map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocalName {
	/// Numeric index, including the automatic one assigned on save.
	Index(u64),
	/// The `"default"` slot.
	Default,
	/// Any other caller-chosen name.
	Named(String),
}

impl LocalName {
	/// Returns true for digits-only names, whether or not they fit an index.
	pub fn is_numeric(&self) -> bool {
		match self {
			Self::Index(_) => true,
			Self::Default => false,
			Self::Named(name) => is_digits(name),
		}
	}

	/// Canonical form of the name.
	pub fn normalized(self) -> Self {
		match self {
			Self::Named(name) => Self::parse(name),
			other => other,
		}
	}

	fn parse(name: String) -> Self {
		if name == DEFAULT_NAME {
			return Self::Default;
		}
		let canonical = is_digits(&name) && (name == "0" || !name.starts_with('0'));
		if canonical && let Ok(index) = name.parse::<u64>() {
			return Self::Index(index);
		}
		Self::Named(name)
	}
}

fn is_digits(name: &str) -> bool {
	!name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for LocalName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Index(index) => write!(f, "{}", index),
			Self::Default => f.write_str(DEFAULT_NAME),
			Self::Named(name) => f.write_str(name),
		}
	}
}

impl From<&str> for LocalName {
	fn from(name: &str) -> Self {
		Self::parse(name.to_string())
	}
}

impl From<String> for LocalName {
	fn from(name: String) -> Self {
		Self::parse(name)
	}
}

impl From<&String> for LocalName {
	fn from(name: &String) -> Self {
		Self::parse(name.clone())
	}
}

impl From<u64> for LocalName {
	fn from(index: u64) -> Self {
		Self::Index(index)
	}
}

impl From<u32> for LocalName {
	fn from(index: u32) -> Self {
		Self::Index(u64::from(index))
	}
}

impl From<usize> for LocalName {
	fn from(index: usize) -> Self {
		Self::Index(index as u64)
	}
}

impl From<i32> for LocalName {
	fn from(index: i32) -> Self {
		match u64::try_from(index) {
			Ok(index) => Self::Index(index),
			Err(_) => Self::Named(index.to_string()),
		}
	}
}

impl From<i64> for LocalName {
	fn from(index: i64) -> Self {
		match u64::try_from(index) {
			Ok(index) => Self::Index(index),
			Err(_) => Self::Named(index.to_string()),
		}
	}
}

/// Registry key made of a class name and a local name.
///
/// Rendered as `"<class>:<name>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceKey {
	class: String,
	name: LocalName,
}

impl ReferenceKey {
	/// Creates a key. The name is normalised first.
	pub fn new(class: impl Into<String>, name: impl Into<LocalName>) -> Self {
		Self {
			class: class.into(),
			name: name.into().normalized(),
		}
	}

	/// Class part of the key.
	pub fn class(&self) -> &str {
		&self.class
	}

	/// Local part of the key.
	pub fn name(&self) -> &LocalName {
		&self.name
	}

	/// Returns true if the key belongs to `class` and its name is digits only.
	pub fn is_auto_indexed_for(&self, class: &str) -> bool {
		self.class == class && self.name.is_numeric()
	}
}

impl fmt::Display for ReferenceKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.class, self.name)
	}
}

/// One or more extra local names passed when creating an entity.
///
/// # Example
///
/// ```
/// use mcfly_fixtures::reference::{LocalName, References};
///
/// let none = References::none();
/// assert!(none.is_empty());
///
/// let one = References::from("price:100");
/// assert_eq!(one.len(), 1);
///
/// let many = References::from(vec!["price:100", "duration:60"]);
/// assert_eq!(many.names()[1], LocalName::Named("duration:60".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References(Vec<LocalName>);

impl References {
	/// No extra names.
	pub fn none() -> Self {
		Self::default()
	}

	/// Names in the order they were given.
	pub fn names(&self) -> &[LocalName] {
		&self.0
	}

	/// Number of names.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if there are no names.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl IntoIterator for References {
	type Item = LocalName;
	type IntoIter = std::vec::IntoIter<LocalName>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl From<LocalName> for References {
	fn from(name: LocalName) -> Self {
		Self(vec![name])
	}
}

impl From<&str> for References {
	fn from(name: &str) -> Self {
		Self(vec![name.into()])
	}
}

impl From<String> for References {
	fn from(name: String) -> Self {
		Self(vec![name.into()])
	}
}

impl From<u64> for References {
	fn from(index: u64) -> Self {
		Self(vec![index.into()])
	}
}

impl From<i32> for References {
	fn from(index: i32) -> Self {
		Self(vec![index.into()])
	}
}

impl<N: Into<LocalName>> From<Vec<N>> for References {
	fn from(names: Vec<N>) -> Self {
		Self(names.into_iter().map(Into::into).collect())
	}
}

impl<N: Into<LocalName>, const LEN: usize> From<[N; LEN]> for References {
	fn from(names: [N; LEN]) -> Self {
		Self(names.into_iter().map(Into::into).collect())
	}
}

impl<N: Into<References>> From<Option<N>> for References {
	fn from(names: Option<N>) -> Self {
		names.map(Into::into).unwrap_or_default()
	}
}
