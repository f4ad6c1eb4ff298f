//! Type-erased extension map for AppState
//!
//! Lets the feature crates (GraphQL schema, admin state) hang their own
//! values off the shared state without the core knowing their types.

use std::any::{Any, TypeId};
use std::collections::HashMap;

pub struct Extensions {
	map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Extensions {
	pub fn new() -> Self {
		Self { map: HashMap::new() }
	}

	/// Insert a value, replacing any previous value of the same type
	pub fn insert<T: Send + Sync + 'static>(&mut self, val: T) -> Option<T> {
		self.map
			.insert(TypeId::of::<T>(), Box::new(val))
			.and_then(|prev| prev.downcast::<T>().ok())
			.map(|prev| *prev)
	}

	pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
		self.map.get(&TypeId::of::<T>())?.downcast_ref::<T>()
	}

	pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
		self.map.contains_key(&TypeId::of::<T>())
	}
}

impl Default for Extensions {
	fn default() -> Self {
		Self::new()
	}
}


// vim: ts=4
