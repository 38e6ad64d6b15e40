use sqlx::SqlitePool;

use super::models::ProjectNote;

/// Record a note for a project. Empty or whitespace-only text is ignored.
pub async fn add_note(
    pool: &SqlitePool,
    project_name: &str,
    note: &str,
) -> Result<(), sqlx::Error> {
    if note.trim().is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT INTO project_notes (project_name, note, created_at)
         VALUES (?, ?, datetime('now'))",
    )
    .bind(project_name)
    .bind(note.trim())
    .execute(pool)
    .await?;
    Ok(())
}

/// All notes for one project, newest first.
pub async fn list_notes(
    pool: &SqlitePool,
    project_name: &str,
) -> Result<Vec<ProjectNote>, sqlx::Error> {
    sqlx::query_as::<_, ProjectNote>(
        "SELECT id, project_name, note, created_at
         FROM project_notes WHERE project_name = ?
         ORDER BY created_at DESC, id DESC",
    )
    .bind(project_name)
    .fetch_all(pool)
    .await
}

/// Replace the text of an existing note. Returns rows affected.
pub async fn update_note(
    pool: &SqlitePool,
    note_id: i64,
    new_text: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE project_notes SET note = ? WHERE id = ?")
        .bind(new_text)
        .bind(note_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
#[path = "tests/notes_repo_test.rs"]
mod tests;
