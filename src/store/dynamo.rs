//! DynamoDB-backed store for the function deployment.
//!
//! Items are flat maps: strings as `S`, integers as `N`, partition key `id`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use super::{PokemonStore, StoreError, StoreResult, UpdatePolicy};
use crate::model::{Pokemon, DEFAULT_HP, DEFAULT_IMAGE, DEFAULT_LEVEL, DEFAULT_POKEDEX_NUMBER};

const KEY: &str = "id";

const UPDATE_EXPRESSION: &str = "SET #name = :name, #type = :type, #level = :level, \
     hp = :hp, image = :image, pokedexNumber = :pokedexNumber";

/// Store backed by a single DynamoDB table
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the ambient AWS configuration (env, profile, role)
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn backend<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    StoreError::Backend(DisplayErrorContext(&err).to_string())
}

/// Encode a record as a DynamoDB item
pub fn to_item(pokemon: &Pokemon) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (KEY.to_string(), AttributeValue::S(pokemon.id.clone())),
        ("name".to_string(), AttributeValue::S(pokemon.name.clone())),
        ("type".to_string(), AttributeValue::S(pokemon.kind.clone())),
        ("image".to_string(), AttributeValue::S(pokemon.image.clone())),
        (
            "pokedexNumber".to_string(),
            AttributeValue::N(pokemon.pokedex_number.to_string()),
        ),
        ("level".to_string(), AttributeValue::N(pokemon.level.to_string())),
        ("hp".to_string(), AttributeValue::N(pokemon.hp.to_string())),
    ])
}

/// Decode a DynamoDB item. Optional attributes fall back to record defaults.
pub fn from_item(item: &HashMap<String, AttributeValue>) -> StoreResult<Pokemon> {
    let id = item
        .get(KEY)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| StoreError::Malformed {
            id: "<unknown>".to_string(),
            reason: "missing string attribute 'id'".to_string(),
        })?;

    let malformed = |reason: String| StoreError::Malformed {
        id: id.clone(),
        reason,
    };

    let string = |key: &str| -> StoreResult<Option<String>> {
        match item.get(key) {
            None | Some(AttributeValue::Null(_)) => Ok(None),
            Some(AttributeValue::S(s)) => Ok(Some(s.clone())),
            Some(_) => Err(malformed(format!("attribute '{}' is not a string", key))),
        }
    };

    let number = |key: &str| -> StoreResult<Option<i64>> {
        match item.get(key) {
            None | Some(AttributeValue::Null(_)) => Ok(None),
            Some(AttributeValue::N(n)) => n
                .parse::<i64>()
                .map(Some)
                .map_err(|_| malformed(format!("attribute '{}' is not an integer: {}", key, n))),
            Some(_) => Err(malformed(format!("attribute '{}' is not a number", key))),
        }
    };

    let name = string("name")?.ok_or_else(|| malformed("missing attribute 'name'".to_string()))?;
    let kind = string("type")?.ok_or_else(|| malformed("missing attribute 'type'".to_string()))?;

    Ok(Pokemon {
        name,
        kind,
        image: string("image")?.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        pokedex_number: number("pokedexNumber")?.unwrap_or(DEFAULT_POKEDEX_NUMBER),
        level: number("level")?.unwrap_or(DEFAULT_LEVEL),
        hp: number("hp")?.unwrap_or(DEFAULT_HP),
        id,
    })
}

#[async_trait]
impl PokemonStore for DynamoStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Pokemon>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(backend)?;

        output.item().map(from_item).transpose()
    }

    async fn scan(&self) -> StoreResult<Vec<Pokemon>> {
        let items: Vec<HashMap<String, AttributeValue>> = self
            .client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(backend)?;

        items.iter().map(from_item).collect()
    }

    async fn put(&self, pokemon: &Pokemon) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(pokemon)))
            .send()
            .await
            .map_err(backend)?;

        Ok(())
    }

    async fn update(
        &self,
        pokemon: &Pokemon,
        policy: UpdatePolicy,
    ) -> StoreResult<Option<Pokemon>> {
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY, AttributeValue::S(pokemon.id.clone()))
            .update_expression(UPDATE_EXPRESSION)
            .expression_attribute_names("#name", "name")
            .expression_attribute_names("#type", "type")
            .expression_attribute_names("#level", "level")
            .expression_attribute_values(":name", AttributeValue::S(pokemon.name.clone()))
            .expression_attribute_values(":type", AttributeValue::S(pokemon.kind.clone()))
            .expression_attribute_values(":level", AttributeValue::N(pokemon.level.to_string()))
            .expression_attribute_values(":hp", AttributeValue::N(pokemon.hp.to_string()))
            .expression_attribute_values(":image", AttributeValue::S(pokemon.image.clone()))
            .expression_attribute_values(
                ":pokedexNumber",
                AttributeValue::N(pokemon.pokedex_number.to_string()),
            )
            .return_values(ReturnValue::AllNew);

        if policy == UpdatePolicy::Reject {
            request = request.condition_expression("attribute_exists(id)");
        }

        match request.send().await {
            Ok(output) => output
                .attributes()
                .map(from_item)
                .transpose()?
                .map(Some)
                .ok_or_else(|| StoreError::Backend("update returned no attributes".to_string())),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Ok(None)
            }
            Err(err) => Err(backend(err)),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(KEY, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(backend)?;

        Ok(())
    }
}
