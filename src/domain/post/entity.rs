//! Post entity and the embedded author snapshot

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::account::{Account, AccountId};

/// Server-generated post identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public view of the account that wrote a post, joined at read time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Account> for Author {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            name: account.name().to_string(),
            email: account.email().to_string(),
            created_at: account.created_at(),
            updated_at: account.updated_at(),
        }
    }
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    title: String,
    body: String,
    account_id: AccountId,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    author: Author,
}

impl Post {
    /// Rebuild a post from persisted state
    pub fn restore(
        id: PostId,
        title: impl Into<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
        author: Author,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            account_id: author.id,
            created_at,
            updated_at,
            author,
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Owning account. Fixed at creation; authorship cannot be transferred.
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Replace the author snapshot with a fresher read of the same account
    pub fn with_author(mut self, author: Author) -> Self {
        if author.id == self.account_id {
            self.author = author;
        }
        self
    }
}

/// Data needed to insert a new post row
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub account_id: AccountId,
}
