//! User records and the randomuser-style wire format they are decoded from.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserName {
    pub title: String,
    pub first: String,
    pub last: String,
}

/// A fetched user. Never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    pub name: UserName,
    pub username: String,
    pub thumbnail_url: String,
}

impl User {
    /// "Title First Last", as shown in the table.
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.name.title, self.name.first, self.name.last)
    }
}

/// Body of `GET /api/?results=N`. Fields we do not render are ignored.
#[derive(Debug, Deserialize)]
pub struct RandomUserResponse {
    pub results: Vec<RandomUserItem>,
}

#[derive(Debug, Deserialize)]
pub struct RandomUserItem {
    pub name: RandomUserName,
    pub login: RandomUserLogin,
    pub picture: RandomUserPicture,
}

#[derive(Debug, Deserialize)]
pub struct RandomUserName {
    pub title: String,
    pub first: String,
    pub last: String,
}

#[derive(Debug, Deserialize)]
pub struct RandomUserLogin {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct RandomUserPicture {
    pub thumbnail: String,
}

impl From<RandomUserItem> for User {
    fn from(item: RandomUserItem) -> Self {
        Self {
            name: UserName {
                title: item.name.title,
                first: item.name.first,
                last: item.name.last,
            },
            username: item.login.username,
            thumbnail_url: item.picture.thumbnail,
        }
    }
}

impl From<RandomUserResponse> for Vec<User> {
    fn from(response: RandomUserResponse) -> Self {
        response.results.into_iter().map(User::from).collect()
    }
}
