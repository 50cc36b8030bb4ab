//! # Pet API Module
//!
//! Read-only pet directory. Pets are created by provisioning only, so the
//! one piece of logic here is the display ordering applied to the listing.

use crate::{consts, models, repo};
use serde::Serialize;

/// Schema for displaying pets in the directory listing.
#[derive(Debug, Serialize)]
pub struct PetListSchema {
    pub id: i64,
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<i64>,
}

impl From<models::pet::Pet> for PetListSchema {
    fn from(val: models::pet::Pet) -> Self {
        PetListSchema {
            id: val.id,
            name: val.name,
            breed: val.breed,
            age: val.age,
        }
    }
}

/// Rank of a pet within the display policy: position in
/// [PET_DISPLAY_PRIORITY](consts::PET_DISPLAY_PRIORITY) when pinned,
/// after all pinned names otherwise.
fn display_priority(pet_name: &str) -> usize {
    consts::PET_DISPLAY_PRIORITY
        .iter()
        .position(|name| *name == pet_name)
        .unwrap_or(consts::PET_DISPLAY_PRIORITY.len())
}

/// Retrieves all pets in display order: priority names pinned first, the
/// rest in id order. This is a deliberate display policy, not business logic.
pub async fn get_pets_display_list(
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<PetListSchema>> {
    let mut pets = repo.get_all_pets().await?;
    pets.sort_by_key(|pet| (display_priority(&pet.name), pet.id));

    Ok(pets.into_iter().map(Into::into).collect())
}
