//! Roster record model and validation.
//!
//! # Responsibility
//! - Define the `Player` entity keyed by a store-assigned surrogate id and
//!   the boundary `PlayerDto`.
//! - Validate and convert DTO input field by field before persistence.
//!
//! # Invariants
//! - `id` is assigned by the store on insert, never by the caller.
//! - `squad_number` must be unique across all live players; the model only
//!   enforces positivity, uniqueness belongs to service and store.

use crate::model::dates::CivilDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Roster entity as persisted in the `players` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Surrogate primary key; `None` until the store assigns one.
    pub id: Option<i64>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    /// Persisted as ISO-8601 text.
    pub date_of_birth: Option<CivilDate>,
    /// Jersey number, globally unique across live players.
    pub squad_number: i64,
    pub position: String,
    pub abbr_position: Option<String>,
    pub team: String,
    pub league: Option<String>,
    pub starting11: bool,
}

/// Boundary representation of a player.
///
/// Every field is optional at the type level; acceptability is decided by
/// [`PlayerDto::try_into_entity`] alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDto {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    /// ISO-8601 `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
    pub squad_number: Option<i64>,
    pub position: Option<String>,
    pub abbr_position: Option<String>,
    pub team: Option<String>,
    pub league: Option<String>,
    pub starting11: Option<bool>,
}

/// Field-level validation failure for player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerValidationError {
    MissingFirstName,
    MissingLastName,
    MissingPosition,
    MissingTeam,
    MissingSquadNumber,
    SquadNumberNotPositive(i64),
    InvalidDateOfBirth(String),
    DateOfBirthNotInPast(String),
}

impl Display for PlayerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFirstName => write!(f, "first name must not be blank"),
            Self::MissingLastName => write!(f, "last name must not be blank"),
            Self::MissingPosition => write!(f, "position must not be blank"),
            Self::MissingTeam => write!(f, "team must not be blank"),
            Self::MissingSquadNumber => write!(f, "squad number is required"),
            Self::SquadNumberNotPositive(value) => {
                write!(f, "squad number must be positive, got {value}")
            }
            Self::InvalidDateOfBirth(value) => {
                write!(f, "invalid date of birth: `{value}`")
            }
            Self::DateOfBirthNotInPast(value) => {
                write!(f, "date of birth must be in the past: `{value}`")
            }
        }
    }
}

impl Error for PlayerValidationError {}

impl PlayerDto {
    /// Validates every field and converts into a persistable entity.
    ///
    /// # Contract
    /// - First name, last name, position and team must be non-blank.
    /// - Squad number must be present and positive.
    /// - Date of birth, when present, must be a real past calendar date.
    /// - `id` passes through untouched; the create path ignores it and the
    ///   update path requires it.
    pub fn try_into_entity(&self) -> Result<Player, PlayerValidationError> {
        let first_name =
            required_text(&self.first_name).ok_or(PlayerValidationError::MissingFirstName)?;
        let last_name =
            required_text(&self.last_name).ok_or(PlayerValidationError::MissingLastName)?;
        let position =
            required_text(&self.position).ok_or(PlayerValidationError::MissingPosition)?;
        let team = required_text(&self.team).ok_or(PlayerValidationError::MissingTeam)?;

        let squad_number = self
            .squad_number
            .ok_or(PlayerValidationError::MissingSquadNumber)?;
        if squad_number <= 0 {
            return Err(PlayerValidationError::SquadNumberNotPositive(squad_number));
        }

        let date_of_birth = match self.date_of_birth.as_deref() {
            Some(raw) => {
                let date = CivilDate::parse_iso(raw)
                    .ok_or_else(|| PlayerValidationError::InvalidDateOfBirth(raw.to_string()))?;
                if date >= CivilDate::today() {
                    return Err(PlayerValidationError::DateOfBirthNotInPast(raw.to_string()));
                }
                Some(date)
            }
            None => None,
        };

        Ok(Player {
            id: self.id,
            first_name,
            middle_name: self.middle_name.clone(),
            last_name,
            date_of_birth,
            squad_number,
            position,
            abbr_position: self.abbr_position.clone(),
            team,
            league: self.league.clone(),
            starting11: self.starting11.unwrap_or(false),
        })
    }
}

impl Player {
    /// Converts back to the boundary representation. Never fails.
    pub fn to_dto(&self) -> PlayerDto {
        PlayerDto {
            id: self.id,
            first_name: Some(self.first_name.clone()),
            middle_name: self.middle_name.clone(),
            last_name: Some(self.last_name.clone()),
            date_of_birth: self.date_of_birth.map(CivilDate::to_iso),
            squad_number: Some(self.squad_number),
            position: Some(self.position.clone()),
            abbr_position: self.abbr_position.clone(),
            team: Some(self.team.clone()),
            league: self.league.clone(),
            starting11: Some(self.starting11),
        }
    }
}

fn required_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::{PlayerDto, PlayerValidationError};

    fn valid_dto() -> PlayerDto {
        PlayerDto {
            id: None,
            first_name: Some("Lionel".to_string()),
            middle_name: Some("Andrés".to_string()),
            last_name: Some("Messi".to_string()),
            date_of_birth: Some("1987-06-24".to_string()),
            squad_number: Some(10),
            position: Some("Right Winger".to_string()),
            abbr_position: Some("RW".to_string()),
            team: Some("Inter Miami CF".to_string()),
            league: Some("Major League Soccer".to_string()),
            starting11: Some(true),
        }
    }

    #[test]
    fn valid_dto_converts() {
        let player = valid_dto().try_into_entity().unwrap();
        assert_eq!(player.id, None);
        assert_eq!(player.squad_number, 10);
        assert_eq!(player.date_of_birth.unwrap().to_iso(), "1987-06-24");
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let mut dto = valid_dto();
        dto.first_name = Some("".to_string());
        assert_eq!(
            dto.try_into_entity().unwrap_err(),
            PlayerValidationError::MissingFirstName
        );

        let mut dto = valid_dto();
        dto.team = None;
        assert_eq!(
            dto.try_into_entity().unwrap_err(),
            PlayerValidationError::MissingTeam
        );
    }

    #[test]
    fn non_positive_squad_number_is_rejected() {
        let mut dto = valid_dto();
        dto.squad_number = Some(0);
        assert_eq!(
            dto.try_into_entity().unwrap_err(),
            PlayerValidationError::SquadNumberNotPositive(0)
        );

        dto.squad_number = None;
        assert_eq!(
            dto.try_into_entity().unwrap_err(),
            PlayerValidationError::MissingSquadNumber
        );
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let mut dto = valid_dto();
        dto.date_of_birth = Some("2999-01-01".to_string());
        assert!(matches!(
            dto.try_into_entity().unwrap_err(),
            PlayerValidationError::DateOfBirthNotInPast(_)
        ));
    }

    #[test]
    fn round_trip_preserves_fields() {
        let mut dto = valid_dto();
        dto.id = Some(7);
        let player = dto.try_into_entity().unwrap();
        assert_eq!(player.to_dto(), dto);
    }
}
