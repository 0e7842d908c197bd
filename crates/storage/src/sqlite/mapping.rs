use sqlx::Row;
use uuid::Uuid;

use quiz_core::model::{
    Category, CategoryId, CategoryProgress, Choice, Difficulty, LearningRecommendation, Profile,
    ProfileId, Question, QuestionId, QuizAttempt, WrongNote,
};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(i64_to_u64("question_id", v)?))
}

pub(crate) fn category_id_from_i64(v: i64) -> Result<CategoryId, StorageError> {
    Ok(CategoryId::new(i64_to_u64("category_id", v)?))
}

pub(crate) fn profile_id_from_i64(v: i64) -> Result<ProfileId, StorageError> {
    Ok(ProfileId::new(i64_to_u64("profile_id", v)?))
}

/// Converts a `Difficulty` to its storage representation (ordinal 1..=5).
pub(crate) fn difficulty_to_i64(difficulty: Difficulty) -> i64 {
    i64::from(difficulty.level())
}

/// Converts a stored ordinal back into `Difficulty`.
/// This must stay consistent with `difficulty_to_i64`.
pub(crate) fn difficulty_from_i64(value: i64) -> Result<Difficulty, StorageError> {
    let level =
        u8::try_from(value).map_err(|_| StorageError::Serialization(format!("invalid difficulty: {value}")))?;
    Difficulty::from_level(level).map_err(ser)
}

pub(crate) fn selected_index_to_i64(selected: Option<usize>) -> Result<Option<i64>, StorageError> {
    selected
        .map(|index| {
            i64::try_from(index)
                .map_err(|_| StorageError::Serialization("selected_index overflow".into()))
        })
        .transpose()
}

pub(crate) fn selected_index_from_i64(
    value: Option<i64>,
) -> Result<Option<usize>, StorageError> {
    value
        .map(|v| {
            usize::try_from(v)
                .map_err(|_| StorageError::Serialization(format!("invalid selected_index: {v}")))
        })
        .transpose()
}

pub(crate) fn uuid_from_str(value: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(value).map_err(ser)
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    let options_json: String = row.try_get("options").map_err(ser)?;
    let options: Vec<String> = serde_json::from_str(&options_json).map_err(ser)?;

    let correct_index_i64: i64 = row.try_get("correct_index").map_err(ser)?;
    let correct_index = usize::try_from(correct_index_i64).map_err(|_| {
        StorageError::Serialization(format!("invalid correct_index: {correct_index_i64}"))
    })?;

    Question::new(
        question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        category_id_from_i64(row.try_get::<i64, _>("category_id").map_err(ser)?)?,
        row.try_get::<String, _>("prompt").map_err(ser)?,
        options,
        correct_index,
        row.try_get::<Option<String>, _>("explanation").map_err(ser)?,
        difficulty_from_i64(row.try_get::<i64, _>("difficulty").map_err(ser)?)?,
        row.try_get::<Option<String>, _>("image_path").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_category_row(row: &sqlx::sqlite::SqliteRow) -> Result<Category, StorageError> {
    Category::new(
        category_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<Option<String>, _>("icon_name").map_err(ser)?,
        row.try_get::<Option<String>, _>("theme_color").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_profile_row(row: &sqlx::sqlite::SqliteRow) -> Result<Profile, StorageError> {
    Profile::new(
        profile_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
        row.try_get::<Option<String>, _>("icon_name").map_err(ser)?,
        row.try_get::<Option<String>, _>("theme_color").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_attempt_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuizAttempt, StorageError> {
    Ok(QuizAttempt {
        profile_id: profile_id_from_i64(row.try_get::<i64, _>("profile_id").map_err(ser)?)?,
        question_id: question_id_from_i64(row.try_get::<i64, _>("question_id").map_err(ser)?)?,
        attempt_date: row.try_get("attempt_date").map_err(ser)?,
        selected_index: selected_index_from_i64(
            row.try_get::<Option<i64>, _>("selected_index").map_err(ser)?,
        )?,
        was_correct: row.try_get::<i64, _>("was_correct").map_err(ser)? != 0,
        time_taken: row.try_get::<Option<f64>, _>("time_taken").map_err(ser)?,
    })
}

pub(crate) fn map_wrong_note_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<WrongNote, StorageError> {
    let id = uuid_from_str(row.try_get::<String, _>("id").map_err(ser)?.as_str())?;

    let choices_json: String = row.try_get("choices").map_err(ser)?;
    let choices: Vec<Choice> = serde_json::from_str(&choices_json).map_err(ser)?;

    let recommendations_json: String = row.try_get("recommendations").map_err(ser)?;
    let recommendations: Vec<LearningRecommendation> =
        serde_json::from_str(&recommendations_json).map_err(ser)?;

    Ok(WrongNote::from_persisted(
        id,
        row.try_get::<String, _>("question").map_err(ser)?,
        choices,
        row.try_get::<String, _>("correct_answer").map_err(ser)?,
        row.try_get::<String, _>("user_answer").map_err(ser)?,
        row.try_get::<String, _>("explanation").map_err(ser)?,
        difficulty_from_i64(row.try_get::<i64, _>("difficulty").map_err(ser)?)?,
        row.try_get::<String, _>("category_name").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
        row.try_get::<String, _>("memo").map_err(ser)?,
        recommendations,
    ))
}

pub(crate) fn map_progress_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<CategoryProgress, StorageError> {
    let total_i64: i64 = row.try_get("total_attempts").map_err(ser)?;
    let correct_i64: i64 = row.try_get("correct_attempts").map_err(ser)?;

    Ok(CategoryProgress {
        profile_id: profile_id_from_i64(row.try_get::<i64, _>("profile_id").map_err(ser)?)?,
        category_id: category_id_from_i64(row.try_get::<i64, _>("category_id").map_err(ser)?)?,
        total_attempts: u32::try_from(total_i64)
            .map_err(|_| StorageError::Serialization(format!("invalid total_attempts: {total_i64}")))?,
        correct_attempts: u32::try_from(correct_i64).map_err(|_| {
            StorageError::Serialization(format!("invalid correct_attempts: {correct_i64}"))
        })?,
        last_attempted_at: row.try_get("last_attempted_at").map_err(ser)?,
    })
}
