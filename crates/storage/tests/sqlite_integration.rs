use chrono::Duration;
use std::sync::Arc;

use quiz_core::model::{
    AnswerRecord, Category, CategoryId, Difficulty, Profile, ProfileId, Question, QuestionId,
    QuizAttempt, WrongNote,
};
use quiz_core::time::fixed_now;
use storage::repository::{
    AttemptRepository, CategoryRepository, ProfileRepository, ProgressRepository,
    QuestionRepository, StorageError, WrongNoteRepository,
};
use storage::sqlite::SqliteRepository;

async fn migrated(db: &str) -> Arc<SqliteRepository> {
    let repo = SqliteRepository::connect(&format!("sqlite:file:{db}?mode=memory&cache=shared"))
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    Arc::new(repo)
}

fn build_question(id: u64, prompt: &str, difficulty: Difficulty) -> Question {
    Question::new(
        QuestionId::new(id),
        CategoryId::new(1),
        prompt,
        vec!["a".to_string(), "b".to_string(), "c".to_string()],
        1,
        Some("explained".to_string()),
        difficulty,
        Some("images/q.png".to_string()),
        fixed_now(),
    )
    .unwrap()
}

async fn seed_category(repo: &SqliteRepository) {
    let category = Category::new(
        CategoryId::new(1),
        "Swift",
        Some("swift".to_string()),
        Some("#3498DB".to_string()),
    )
    .unwrap();
    repo.upsert_category(&category).await.unwrap();
}

#[tokio::test]
async fn sqlite_roundtrips_questions_with_options_intact() {
    let repo = migrated("memdb_questions").await;
    seed_category(&repo).await;

    let question = build_question(1, "What does `let` declare?", Difficulty::Level3);
    repo.upsert_question(&question).await.unwrap();

    let fetched = repo
        .get_question(QuestionId::new(1))
        .await
        .unwrap()
        .expect("question");
    assert_eq!(fetched, question);

    // Upsert replaces content under the same id.
    let revised = build_question(1, "What does `var` declare?", Difficulty::Level4);
    repo.upsert_question(&revised).await.unwrap();
    let listed = repo
        .list_questions(CategoryId::new(1), Some(Difficulty::Level4))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].prompt(), "What does `var` declare?");
}

#[tokio::test]
async fn sqlite_lists_by_prompt_and_filters_difficulty() {
    let repo = migrated("memdb_listing").await;
    seed_category(&repo).await;

    repo.upsert_question(&build_question(1, "zebra", Difficulty::Level2))
        .await
        .unwrap();
    repo.upsert_question(&build_question(2, "apple", Difficulty::Level2))
        .await
        .unwrap();
    repo.upsert_question(&build_question(3, "mango", Difficulty::Level5))
        .await
        .unwrap();

    let listed = repo
        .list_questions(CategoryId::new(1), Some(Difficulty::Level2))
        .await
        .unwrap();
    let prompts: Vec<_> = listed.iter().map(Question::prompt).collect();
    assert_eq!(prompts, ["apple", "zebra"]);

    let all = repo.list_questions(CategoryId::new(1), None).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn sqlite_cascades_category_deletion() {
    let repo = migrated("memdb_cascade").await;
    seed_category(&repo).await;
    repo.upsert_question(&build_question(1, "q", Difficulty::Level1))
        .await
        .unwrap();

    repo.delete_category(CategoryId::new(1)).await.unwrap();

    assert!(repo.get_question(QuestionId::new(1)).await.unwrap().is_none());
    let err = repo.delete_category(CategoryId::new(1)).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_persists_attempts_and_profiles() {
    let repo = migrated("memdb_attempts").await;
    seed_category(&repo).await;

    let profile = Profile::new(ProfileId::new(1), "Mina", fixed_now(), None, None).unwrap();
    repo.upsert_profile(&profile).await.unwrap();
    assert_eq!(repo.list_profiles().await.unwrap().len(), 1);

    let question = build_question(1, "q", Difficulty::Level1);
    repo.upsert_question(&question).await.unwrap();

    let older = QuizAttempt::from_record(
        profile.id(),
        question.id(),
        &AnswerRecord::commit(0, &question, Some(1)),
        fixed_now(),
        Some(4.5),
    );
    let newer = QuizAttempt::from_record(
        profile.id(),
        question.id(),
        &AnswerRecord::unanswered(1),
        fixed_now() + Duration::minutes(3),
        None,
    );
    repo.append_attempts(&[older.clone(), newer.clone()])
        .await
        .unwrap();

    let listed = repo.list_attempts(profile.id()).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].attempt_date, newer.attempt_date);
    assert_eq!(listed[0].selected_index, None);
    assert_eq!(listed[1].selected_index, Some(1));
    assert_eq!(listed[1].time_taken, Some(4.5));
}

#[tokio::test]
async fn sqlite_roundtrips_wrong_notes_and_memos() {
    let repo = migrated("memdb_notes").await;
    seed_category(&repo).await;

    let profile = Profile::new(ProfileId::new(1), "Mina", fixed_now(), None, None).unwrap();
    repo.upsert_profile(&profile).await.unwrap();

    let question = build_question(1, "q", Difficulty::Level3);
    let note = WrongNote::from_question(&question, None, "Swift", fixed_now());
    repo.append_notes(profile.id(), std::slice::from_ref(&note))
        .await
        .unwrap();

    let listed = repo.list_notes(profile.id()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], note);
    assert!(listed[0].is_unanswered());

    repo.update_memo(note.id(), "study declarations").await.unwrap();
    let relisted = repo.list_notes(profile.id()).await.unwrap();
    assert_eq!(relisted[0].memo(), "study declarations");

    repo.delete_note(note.id()).await.unwrap();
    assert!(repo.list_notes(profile.id()).await.unwrap().is_empty());
    let err = repo.delete_note(note.id()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_accumulates_category_progress() {
    let repo = migrated("memdb_progress").await;
    seed_category(&repo).await;

    let profile = Profile::new(ProfileId::new(1), "Mina", fixed_now(), None, None).unwrap();
    repo.upsert_profile(&profile).await.unwrap();

    repo.record_attempts(profile.id(), CategoryId::new(1), 4, 3, fixed_now())
        .await
        .unwrap();
    repo.record_attempts(
        profile.id(),
        CategoryId::new(1),
        2,
        0,
        fixed_now() + Duration::hours(1),
    )
    .await
    .unwrap();

    let progress = repo
        .get_progress(profile.id(), CategoryId::new(1))
        .await
        .unwrap()
        .expect("progress");
    assert_eq!(progress.total_attempts, 6);
    assert_eq!(progress.correct_attempts, 3);
    assert_eq!(
        progress.last_attempted_at,
        Some(fixed_now() + Duration::hours(1))
    );

    let rows = repo.list_progress(profile.id()).await.unwrap();
    assert_eq!(rows.len(), 1);
}
