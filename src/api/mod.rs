//! # Resource CRUD Contract
//!
//! Transport-independent request handling for `/pokemons`.
//!
//! | Method | Path            | Success | Failure   |
//! |--------|-----------------|---------|-----------|
//! | GET    | /pokemons       | 200     | 500       |
//! | GET    | /pokemons/{id}  | 200     | 404, 500  |
//! | POST   | /pokemons       | 201     | 500       |
//! | PUT    | /pokemons/{id}  | 200     | 404, 500  |
//! | DELETE | /pokemons/{id}  | 204     | 500       |
//!
//! The local server and the function adapter both build an [`ApiRequest`],
//! call [`PokemonHandler::dispatch`], and write back the [`ApiResponse`].

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiResult, ErrorBody};
pub use handler::PokemonHandler;
pub use request::ApiRequest;
pub use response::{ApiResponse, ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN};
