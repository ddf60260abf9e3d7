use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct DbEntitlement {
    pub uuid: String,
    pub user_id: String,
    pub course_uuid: String,
    pub mode: String,
    pub order_number: String,
    pub created_at: String,
    pub expired_at: Option<String>,
    pub enrollment_id: Option<String>,
    pub enrollment_course_run: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct DbUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
}
