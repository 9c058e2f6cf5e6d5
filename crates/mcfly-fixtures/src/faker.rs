//! Locale-aware fake data used for fixture defaults.
//!
//! A thin layer over the `fake` crate that keeps its own generator, so a
//! seeded [`Faker`] produces the same data on every run.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use fake::Fake;
use fake::faker::address::raw::{CityName, CountryName, StreetName, ZipCode};
use fake::faker::company::raw::CompanyName;
use fake::faker::internet::raw::{SafeEmail, Username};
use fake::faker::lorem::raw::{Paragraph, Sentence, Word, Words};
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{EN, FR_FR, JA_JP, PT_BR, ZH_CN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::random::random_value_with;
use crate::settings::SettingsError;

/// Locales supported by [`Faker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
	/// English.
	#[serde(rename = "en_US", alias = "en")]
	En,
	/// French (France).
	#[default]
	#[serde(rename = "fr_FR", alias = "fr")]
	FrFr,
	/// Portuguese (Brazil).
	#[serde(rename = "pt_BR")]
	PtBr,
	/// Japanese.
	#[serde(rename = "ja_JP")]
	JaJp,
	/// Simplified Chinese.
	#[serde(rename = "zh_CN")]
	ZhCn,
}

impl Locale {
	/// Canonical code, e.g. `"fr_FR"`.
	pub fn code(&self) -> &'static str {
		match self {
			Self::En => "en_US",
			Self::FrFr => "fr_FR",
			Self::PtBr => "pt_BR",
			Self::JaJp => "ja_JP",
			Self::ZhCn => "zh_CN",
		}
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

impl FromStr for Locale {
	type Err = SettingsError;

	/// Accepts `fr_FR`, `fr-FR`, `FR_FR` or the bare language (`fr`).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().replace('-', "_").as_str() {
			"en" | "en_us" | "en_gb" => Ok(Self::En),
			"fr" | "fr_fr" => Ok(Self::FrFr),
			"pt" | "pt_br" => Ok(Self::PtBr),
			"ja" | "ja_jp" => Ok(Self::JaJp),
			"zh" | "zh_cn" => Ok(Self::ZhCn),
			_ => Err(SettingsError::Validation(format!("Unsupported locale: {}", s))),
		}
	}
}

macro_rules! localized {
	($faker:ident, $locale:expr, $rng:expr $(, $arg:expr)*) => {
		match $locale {
			Locale::En => $faker(EN $(, $arg)*).fake_with_rng($rng),
			Locale::FrFr => $faker(FR_FR $(, $arg)*).fake_with_rng($rng),
			Locale::PtBr => $faker(PT_BR $(, $arg)*).fake_with_rng($rng),
			Locale::JaJp => $faker(JA_JP $(, $arg)*).fake_with_rng($rng),
			Locale::ZhCn => $faker(ZH_CN $(, $arg)*).fake_with_rng($rng),
		}
	};
}

/// Random data generator for property defaults.
///
/// # Example
///
/// ```
/// use mcfly_fixtures::faker::{Faker, Locale};
///
/// let mut faker = Faker::seeded(Locale::FrFr, 42);
/// let name = faker.name();
/// assert!(!name.is_empty());
/// assert_eq!(Faker::seeded(Locale::FrFr, 42).name(), name);
/// ```
pub struct Faker {
	locale: Locale,
	rng: StdRng,
}

impl Faker {
	/// Creates a generator seeded from system entropy.
	pub fn new(locale: Locale) -> Self {
		Self {
			locale,
			rng: StdRng::from_entropy(),
		}
	}

	/// Creates a reproducible generator.
	pub fn seeded(locale: Locale, seed: u64) -> Self {
		Self {
			locale,
			rng: StdRng::seed_from_u64(seed),
		}
	}

	/// Locale used for every generated value.
	pub fn locale(&self) -> Locale {
		self.locale
	}

	/// Full person name.
	pub fn name(&mut self) -> String {
		localized!(Name, self.locale, &mut self.rng)
	}

	/// Given name.
	pub fn first_name(&mut self) -> String {
		localized!(FirstName, self.locale, &mut self.rng)
	}

	/// Family name.
	pub fn last_name(&mut self) -> String {
		localized!(LastName, self.locale, &mut self.rng)
	}

	/// Email address on a reserved example domain.
	pub fn email(&mut self) -> String {
		localized!(SafeEmail, self.locale, &mut self.rng)
	}

	/// Login name.
	pub fn username(&mut self) -> String {
		localized!(Username, self.locale, &mut self.rng)
	}

	/// Company name.
	pub fn company(&mut self) -> String {
		localized!(CompanyName, self.locale, &mut self.rng)
	}

	/// City name.
	pub fn city(&mut self) -> String {
		localized!(CityName, self.locale, &mut self.rng)
	}

	/// Street name.
	pub fn street(&mut self) -> String {
		localized!(StreetName, self.locale, &mut self.rng)
	}

	/// Postal code.
	pub fn zip_code(&mut self) -> String {
		localized!(ZipCode, self.locale, &mut self.rng)
	}

	/// Country name.
	pub fn country(&mut self) -> String {
		localized!(CountryName, self.locale, &mut self.rng)
	}

	/// Phone number.
	pub fn phone_number(&mut self) -> String {
		localized!(PhoneNumber, self.locale, &mut self.rng)
	}

	/// Single lorem word.
	pub fn word(&mut self) -> String {
		localized!(Word, self.locale, &mut self.rng)
	}

	/// Between `min` and `max` (inclusive) lorem words.
	///
	/// # Panics
	///
	/// Panics if `min > max`.
	pub fn words(&mut self, min: usize, max: usize) -> Vec<String> {
		let count = inclusive(min, max);
		localized!(Words, self.locale, &mut self.rng, count)
	}

	/// Sentence of `min` to `max` (inclusive) words.
	///
	/// # Panics
	///
	/// Panics if `min > max`.
	pub fn sentence(&mut self, min: usize, max: usize) -> String {
		let count = inclusive(min, max);
		localized!(Sentence, self.locale, &mut self.rng, count)
	}

	/// Paragraph of `min` to `max` (inclusive) sentences.
	///
	/// # Panics
	///
	/// Panics if `min > max`.
	pub fn paragraph(&mut self, min: usize, max: usize) -> String {
		let count = inclusive(min, max);
		localized!(Paragraph, self.locale, &mut self.rng, count)
	}

	/// Integer in `min..=max`.
	///
	/// # Panics
	///
	/// Panics if `min > max`.
	pub fn number_between(&mut self, min: i64, max: i64) -> i64 {
		self.rng.gen_range(min..=max)
	}

	/// `true` with a probability of `ratio` percent.
	pub fn boolean(&mut self, ratio: u8) -> bool {
		self.rng.gen_ratio(u32::from(ratio.min(100)), 100)
	}

	/// One element of `items`, or `None` if it is empty.
	pub fn random_element<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
		random_value_with(&mut self.rng, items)
	}
}

/// Half-open range covering `min..=max`, as the lorem fakers expect.
///
/// `usize::MAX` is clamped so the upper bound cannot overflow.
fn inclusive(min: usize, max: usize) -> Range<usize> {
	assert!(min <= max, "invalid range: min {} is greater than max {}", min, max);
	min..max.saturating_add(1)
}

impl Default for Faker {
	fn default() -> Self {
		Self::new(Locale::default())
	}
}

impl fmt::Debug for Faker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Faker")
			.field("locale", &self.locale)
			.finish_non_exhaustive()
	}
}
