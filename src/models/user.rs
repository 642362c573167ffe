//! User profile model
//!
//! A profile combines identity, physical attributes, weight history, meals,
//! friend references, and the derived daily targets. Validation runs at
//! construction and in every mutating setter. SQL operations cover the
//! users, friends, and weights tables.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::error::{ValidationError, ValidationResult};
use crate::nutrition::goals;

use super::{MacroTargets, Meal};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.[a-z]{2,}$").unwrap());

/// Minimum password length
const MIN_PASSWORD_LEN: usize = 6;

/// User gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

/// Stated goal direction, scaling the calorie target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalDirection {
    #[default]
    Maintain,
    Lose,
    Gain,
}

impl GoalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalDirection::Maintain => "maintain",
            GoalDirection::Lose => "lose",
            GoalDirection::Gain => "gain",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "lose" => GoalDirection::Lose,
            "gain" => GoalDirection::Gain,
            _ => GoalDirection::Maintain,
        }
    }
}

/// A dated weight-history entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

/// Data for constructing a new user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub name: String,
    pub email: String,
    pub password: String,
    pub weight_kg: f64,
    pub height_cm: i32,
    pub gender: Gender,
    pub goal: GoalDirection,
}

/// A user profile. Equality is keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: i64,
    name: String,
    email: String,
    password: String,
    height_cm: i32,
    gender: Gender,
    goal: GoalDirection,
    weight_history: BTreeMap<NaiveDate, f64>,
    meals: Vec<Meal>,
    friends: Vec<i64>,
}

impl User {
    /// Create a new profile. The id stays 0 until the profile is persisted.
    /// The initial weight is recorded in the history under today's date, so
    /// the history is never empty afterwards.
    pub fn new(config: UserConfig) -> ValidationResult<Self> {
        validate_name(&config.name)?;
        validate_email(&config.email)?;
        validate_password(&config.password)?;
        validate_height(config.height_cm)?;
        validate_weight(config.weight_kg)?;

        let mut weight_history = BTreeMap::new();
        weight_history.insert(today(), config.weight_kg);

        Ok(Self {
            id: 0,
            name: config.name,
            email: config.email,
            password: config.password,
            height_cm: config.height_cm,
            gender: config.gender,
            goal: config.goal,
            weight_history,
            meals: Vec::new(),
            friends: Vec::new(),
        })
    }

    // --- Accessors --- //

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn height_cm(&self) -> i32 {
        self.height_cm
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn goal(&self) -> GoalDirection {
        self.goal
    }

    pub fn weight_history(&self) -> &BTreeMap<NaiveDate, f64> {
        &self.weight_history
    }

    /// The most recent weight-history entry
    pub fn current_weight(&self) -> Option<f64> {
        self.weight_history.iter().next_back().map(|(_, kg)| *kg)
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    /// Ids of this user's friends; resolve profiles through the data layer
    pub fn friends(&self) -> &[i64] {
        &self.friends
    }

    /// Daily targets recomputed from the most recent weight-history entry.
    /// Callers without an age on record pass [`goals::DEFAULT_AGE`].
    pub fn daily_targets(&self, age: i32) -> ValidationResult<MacroTargets> {
        let weight = self.current_weight().unwrap_or(0.0);
        goals::macro_targets(weight, self.height_cm, age, self.gender, self.goal)
    }

    // --- Validated setters --- //

    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> ValidationResult<()> {
        let email = email.into();
        validate_email(&email)?;
        self.email = email;
        Ok(())
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> ValidationResult<()> {
        let password = password.into();
        validate_password(&password)?;
        self.password = password;
        Ok(())
    }

    pub fn set_height_cm(&mut self, height_cm: i32) -> ValidationResult<()> {
        validate_height(height_cm)?;
        self.height_cm = height_cm;
        Ok(())
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    pub fn set_goal(&mut self, goal: GoalDirection) {
        self.goal = goal;
    }

    // --- Incremental mutation --- //

    /// Record a weight under today's date, replacing any entry for today
    pub fn record_weight(&mut self, weight_kg: f64) -> ValidationResult<()> {
        self.record_weight_on(today(), weight_kg)
    }

    /// Record a weight under a specific date
    pub fn record_weight_on(&mut self, date: NaiveDate, weight_kg: f64) -> ValidationResult<()> {
        validate_weight(weight_kg)?;
        self.weight_history.insert(date, weight_kg);
        Ok(())
    }

    /// Replace the in-memory weight history, used when hydrating a profile
    /// from storage. The replacement must not be empty.
    pub fn set_weight_history(
        &mut self,
        history: BTreeMap<NaiveDate, f64>,
    ) -> ValidationResult<()> {
        if history.is_empty() {
            return Err(ValidationError::Missing("weight history"));
        }
        for weight in history.values() {
            validate_weight(*weight)?;
        }
        self.weight_history = history;
        Ok(())
    }

    /// Append a meal to the profile
    pub fn add_meal(&mut self, meal: Meal) {
        self.meals.push(meal);
    }

    /// Add a friend reference. A user cannot friend themselves.
    pub fn add_friend(&mut self, friend_id: i64) -> ValidationResult<()> {
        if friend_id == self.id {
            return Err(ValidationError::invalid(
                "a user cannot add themselves as a friend",
            ));
        }
        self.friends.push(friend_id);
        Ok(())
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl std::hash::Hash for User {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Missing("name"));
    }
    Ok(())
}

fn validate_email(email: &str) -> ValidationResult<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::invalid("invalid email address"));
    }
    Ok(())
}

fn validate_password(password: &str) -> ValidationResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::invalid(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_height(height_cm: i32) -> ValidationResult<()> {
    if height_cm <= 0 {
        return Err(ValidationError::invalid("height must be positive"));
    }
    Ok(())
}

fn validate_weight(weight_kg: f64) -> ValidationResult<()> {
    if weight_kg <= 0.0 {
        return Err(ValidationError::invalid("weight must be positive"));
    }
    Ok(())
}

/// Raw users-table row, converted through the validated constructor
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    weight: f64,
    height_cm: i32,
    gender: String,
    goal: String,
}

impl UserRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            password: row.get("password")?,
            weight: row.get("weight")?,
            height_cm: row.get("height_cm")?,
            gender: row.get("gender")?,
            goal: row.get("goal")?,
        })
    }

    fn into_user(self) -> DbResult<User> {
        let mut user = User::new(UserConfig {
            name: self.name,
            email: self.email,
            password: self.password,
            weight_kg: self.weight,
            height_cm: self.height_cm,
            gender: Gender::from_str(&self.gender),
            goal: GoalDirection::from_str(&self.goal),
        })?;
        user.id = self.id;
        Ok(user)
    }
}

impl User {
    /// Insert a new user and assign the generated id back to the profile
    pub fn insert(conn: &Connection, user: &mut User) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO users (name, email, password, weight, height_cm, gender, goal)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                user.name,
                user.email,
                user.password,
                user.current_weight().unwrap_or(0.0),
                user.height_cm,
                user.gender.as_str(),
                user.goal.as_str(),
            ],
        )?;

        user.id = conn.last_insert_rowid();
        Ok(())
    }

    /// Update a persisted user's row
    pub fn update(conn: &Connection, user: &User) -> DbResult<bool> {
        let rows = conn.execute(
            r#"
            UPDATE users
            SET name = ?1, email = ?2, password = ?3, weight = ?4,
                height_cm = ?5, gender = ?6, goal = ?7
            WHERE id = ?8
            "#,
            params![
                user.name,
                user.email,
                user.password,
                user.current_weight().unwrap_or(0.0),
                user.height_cm,
                user.gender.as_str(),
                user.goal.as_str(),
                user.id,
            ],
        )?;
        Ok(rows > 0)
    }

    /// Find a user by email and password (login)
    pub fn find_by_credentials(
        conn: &Connection,
        email: &str,
        password: &str,
    ) -> DbResult<Option<User>> {
        let mut stmt =
            conn.prepare("SELECT * FROM users WHERE email = ?1 AND password = ?2")?;

        let result = stmt.query_row(params![email, password], UserRow::from_row);
        match result {
            Ok(row) => Ok(Some(row.into_user()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Load a user by id, hydrating the weight history from the weights
    /// table when entries exist
    pub fn load(conn: &Connection, id: i64) -> DbResult<Option<User>> {
        let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;

        let row = match stmt.query_row([id], UserRow::from_row) {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut user = row.into_user()?;
        let entries = Self::stored_weight_history(conn, id)?;
        if !entries.is_empty() {
            let history = entries
                .into_iter()
                .map(|e| (e.date, e.weight_kg))
                .collect::<BTreeMap<_, _>>();
            user.set_weight_history(history)?;
        }
        Ok(Some(user))
    }

    /// Add a friend link. Rejected when a user tries to friend themselves.
    pub fn add_friend_link(conn: &Connection, user_id: i64, friend_id: i64) -> DbResult<bool> {
        if user_id == friend_id {
            return Err(ValidationError::invalid(
                "a user cannot add themselves as a friend",
            )
            .into());
        }

        let rows = conn.execute(
            "INSERT INTO friends (user_id, friend_id) VALUES (?1, ?2)",
            params![user_id, friend_id],
        )?;
        Ok(rows > 0)
    }

    /// Remove a friend link
    pub fn remove_friend_link(conn: &Connection, user_id: i64, friend_id: i64) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM friends WHERE user_id = ?1 AND friend_id = ?2",
            params![user_id, friend_id],
        )?;
        Ok(rows > 0)
    }

    /// Fetch the profiles of a user's friends
    pub fn friends_of(conn: &Connection, user_id: i64) -> DbResult<Vec<User>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT u.* FROM users u
            INNER JOIN friends f ON u.id = f.friend_id
            WHERE f.user_id = ?1
            ORDER BY u.name ASC
            "#,
        )?;

        let rows = stmt
            .query_map([user_id], UserRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Search users by name who are not yet friends of the given user
    pub fn search_non_friends(
        conn: &Connection,
        user_id: i64,
        name: &str,
    ) -> DbResult<Vec<User>> {
        let pattern = format!("%{}%", name);
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM users
            WHERE name LIKE ?1 AND id != ?2
              AND id NOT IN (SELECT friend_id FROM friends WHERE user_id = ?2)
            ORDER BY name ASC
            "#,
        )?;

        let rows = stmt
            .query_map(params![pattern, user_id], UserRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Insert a weight-history row dated today
    pub fn insert_weight(conn: &Connection, user_id: i64, weight_kg: f64) -> DbResult<()> {
        validate_weight(weight_kg)?;
        conn.execute(
            "INSERT INTO weights (user_id, weight) VALUES (?1, ?2)",
            params![user_id, weight_kg],
        )?;
        Ok(())
    }

    /// Fetch a user's weight history in date order
    pub fn stored_weight_history(conn: &Connection, user_id: i64) -> DbResult<Vec<WeightEntry>> {
        let mut stmt = conn.prepare(
            "SELECT weight, recorded_on FROM weights WHERE user_id = ?1 ORDER BY recorded_on ASC, id ASC",
        )?;

        let rows = stmt
            .query_map([user_id], |row| {
                Ok((row.get::<_, f64>("weight")?, row.get::<_, String>("recorded_on")?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(rows.len());
        for (weight_kg, recorded_on) in rows {
            let date = NaiveDate::parse_from_str(&recorded_on, "%Y-%m-%d").map_err(|e| {
                ValidationError::Parse {
                    field: "recorded_on",
                    message: e.to_string(),
                }
            })?;
            entries.push(WeightEntry { date, weight_kg });
        }
        Ok(entries)
    }
}
