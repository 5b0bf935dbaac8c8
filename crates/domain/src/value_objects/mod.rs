//! Value objects - immutable, identity-less data compared by content

mod category;
mod gender;
mod names;

pub use category::{EnclosureType, FoodType};
pub use gender::Gender;
pub use names::{AnimalName, Species};
