use anyhow::Result;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::domain::{Gender, UserId};
use crate::entities::user_info;

use super::account::Account;

/// Profile fields as edited by the owner or drawn by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub gender: Gender,
    pub city: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub user_id: UserId,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub gender: Gender,
    pub city: String,
}

impl TryFrom<user_info::Model> for Profile {
    type Error = anyhow::Error;

    fn try_from(model: user_info::Model) -> Result<Self> {
        Ok(Self {
            user_id: UserId::new(model.user_id),
            name: model.name,
            surname: model.surname,
            age: model.age,
            gender: model.gender.parse()?,
            city: model.city,
        })
    }
}

/// Username joined with the profile row, as listed by friend views and search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub username: String,
    pub user_id: UserId,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub gender: Gender,
    pub city: String,
}

/// Raw `username + user_info.*` row.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ProfileSummaryRow {
    pub username: String,
    pub user_id: i32,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub gender: String,
    pub city: String,
}

impl TryFrom<ProfileSummaryRow> for ProfileSummary {
    type Error = anyhow::Error;

    fn try_from(row: ProfileSummaryRow) -> Result<Self> {
        Ok(Self {
            username: row.username,
            user_id: UserId::new(row.user_id),
            name: row.name,
            surname: row.surname,
            age: row.age,
            gender: row.gender.parse()?,
            city: row.city,
        })
    }
}

/// Everything shown on a user's page.
#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub account: Account,
    pub profile: Option<Profile>,
    pub interests: Vec<String>,
}
