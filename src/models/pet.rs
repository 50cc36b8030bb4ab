/// A pet row. Created only by database provisioning; read-only to the app.
#[derive(Debug, Default, Clone)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<i64>,
}
