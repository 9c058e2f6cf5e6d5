//! Test helpers for mcfly-fixtures integration tests.
//!
//! Entities are declared with `#[derive(Buildable)]` so the tests go through
//! the same path as fixture code.

#![allow(dead_code)]

use mcfly_fixtures::prelude::*;
use rstest::fixture;
use serde::Deserialize;

#[derive(Debug, Default, Buildable)]
pub struct Product {
	pub name: String,
	pub price: u32,
}

#[derive(Debug, Default, Buildable)]
pub struct Order {
	pub reference: String,
	pub quantity: u16,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Address {
	pub street: String,
	pub city: String,
}

#[derive(Debug, Default, Buildable)]
#[buildable(class = "App\\Entity\\Customer")]
pub struct Customer {
	#[buildable(rename = "fullName")]
	pub full_name: String,
	pub email: String,
	pub address: Option<Address>,
	pub tags: Vec<String>,
	#[buildable(skip)]
	pub visits: u32,
}

pub struct ProductFixture;

impl Creatable for ProductFixture {
	type Entity = Product;

	fn defaults(&self, faker: &mut Faker) -> PropertyMap {
		properties! {
			"name" => faker.word(),
			"price" => faker.number_between(1, 500),
		}
	}
}

pub struct CustomerFixture;

impl Creatable for CustomerFixture {
	type Entity = Customer;

	fn defaults(&self, faker: &mut Faker) -> PropertyMap {
		properties! {
			"fullName" => faker.name(),
			"email" => faker.email(),
		}
	}
}

/// Context with an in-memory manager and a fixed seed.
#[fixture]
pub fn context() -> FixtureContext {
	FixtureContext::from_settings(
		MemoryPersistenceManager::new(),
		&FixtureSettings::new().with_seed(2024),
	)
}

/// Context paired with a handle on its persistence manager.
#[fixture]
pub fn tracked_context() -> (FixtureContext, MemoryPersistenceManager) {
	let manager = MemoryPersistenceManager::new();
	let context = FixtureContext::from_settings(
		manager.clone(),
		&FixtureSettings::new().with_seed(2024),
	);
	(context, manager)
}
