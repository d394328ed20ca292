//! 问候数据模型

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub name: String,
    pub lastname: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

impl Greeting {
    pub fn for_person(person: &Person) -> Self {
        Self {
            message: format!("Hola {} {}", person.name, person.lastname),
        }
    }
}
