//! Seed catalogue for the local server: the first 25 Pokedex entries.

use serde::Serialize;

use crate::api::{ApiResult, PokemonHandler};
use crate::model::PokemonFields;

const SPRITE_BASE_URL: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEntry {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub level: i64,
    pub hp: i64,
    pub pokedex_number: i64,
}

impl SeedEntry {
    pub fn image_url(&self) -> String {
        format!("{}/{}.png", SPRITE_BASE_URL, self.pokedex_number)
    }

    pub fn fields(&self) -> PokemonFields {
        PokemonFields {
            image: Some(self.image_url()),
            pokedex_number: Some(self.pokedex_number),
            level: Some(self.level),
            hp: Some(self.hp),
            ..PokemonFields::new(self.name, self.kind)
        }
    }
}

#[rustfmt::skip]
pub const SEED: [SeedEntry; 25] = [
    SeedEntry { name: "Bulbasaur", kind: "Grass", level: 5, hp: 45, pokedex_number: 1 },
    SeedEntry { name: "Ivysaur", kind: "Grass", level: 16, hp: 60, pokedex_number: 2 },
    SeedEntry { name: "Venusaur", kind: "Grass", level: 32, hp: 80, pokedex_number: 3 },
    SeedEntry { name: "Charmander", kind: "Fire", level: 5, hp: 39, pokedex_number: 4 },
    SeedEntry { name: "Charmeleon", kind: "Fire", level: 16, hp: 58, pokedex_number: 5 },
    SeedEntry { name: "Charizard", kind: "Fire", level: 36, hp: 78, pokedex_number: 6 },
    SeedEntry { name: "Squirtle", kind: "Water", level: 5, hp: 44, pokedex_number: 7 },
    SeedEntry { name: "Wartortle", kind: "Water", level: 16, hp: 59, pokedex_number: 8 },
    SeedEntry { name: "Blastoise", kind: "Water", level: 36, hp: 79, pokedex_number: 9 },
    SeedEntry { name: "Caterpie", kind: "Bug", level: 3, hp: 45, pokedex_number: 10 },
    SeedEntry { name: "Metapod", kind: "Bug", level: 7, hp: 50, pokedex_number: 11 },
    SeedEntry { name: "Butterfree", kind: "Bug", level: 10, hp: 60, pokedex_number: 12 },
    SeedEntry { name: "Weedle", kind: "Bug", level: 3, hp: 40, pokedex_number: 13 },
    SeedEntry { name: "Kakuna", kind: "Bug", level: 7, hp: 45, pokedex_number: 14 },
    SeedEntry { name: "Beedrill", kind: "Bug", level: 10, hp: 65, pokedex_number: 15 },
    SeedEntry { name: "Pidgey", kind: "Normal", level: 2, hp: 40, pokedex_number: 16 },
    SeedEntry { name: "Pidgeotto", kind: "Normal", level: 18, hp: 63, pokedex_number: 17 },
    SeedEntry { name: "Pidgeot", kind: "Normal", level: 36, hp: 83, pokedex_number: 18 },
    SeedEntry { name: "Rattata", kind: "Normal", level: 2, hp: 30, pokedex_number: 19 },
    SeedEntry { name: "Raticate", kind: "Normal", level: 20, hp: 55, pokedex_number: 20 },
    SeedEntry { name: "Spearow", kind: "Normal", level: 2, hp: 40, pokedex_number: 21 },
    SeedEntry { name: "Fearow", kind: "Normal", level: 20, hp: 65, pokedex_number: 22 },
    SeedEntry { name: "Ekans", kind: "Poison", level: 4, hp: 35, pokedex_number: 23 },
    SeedEntry { name: "Arbok", kind: "Poison", level: 22, hp: 60, pokedex_number: 24 },
    SeedEntry { name: "Pikachu", kind: "Electric", level: 5, hp: 35, pokedex_number: 25 },
];

/// Create every seed entry through the handler; returns how many were stored
pub async fn seed(handler: &PokemonHandler) -> ApiResult<usize> {
    for entry in SEED.iter() {
        handler.create(entry.fields()).await?;
    }
    Ok(SEED.len())
}
