//! Classification group storage. Groups come from a small seeded catalog but
//! new names supplied by the operator are created lazily on first use.

use std::collections::BTreeMap;

use sqlx::{SqliteConnection, SqlitePool};

use super::models::GroupRow;

/// Seeded classification catalog. Descriptions feed both the UI and the
/// external classifier prompt.
pub const DEFAULT_GROUPS: &[(&str, &str)] = &[
    (
        "Serviços Preliminares",
        "Limpeza do terreno, canteiro de obras, tapumes, demolições e remoções",
    ),
    (
        "Movimento de Terra",
        "Escavações manuais e mecanizadas, aterros, reaterros e compactação",
    ),
    (
        "Fundações",
        "Sapatas, estacas, blocos de coroamento, baldrames e concreto magro",
    ),
    (
        "Estrutura",
        "Concreto armado, formas, armação, lajes, vigas e pilares",
    ),
    (
        "Alvenaria e Vedações Verticais",
        "Alvenaria de tijolo ou bloco, divisórias, vergas e contravergas",
    ),
    (
        "Cobertura",
        "Estrutura de telhado, telhas, calhas, rufos e condutores",
    ),
    (
        "Impermeabilização",
        "Mantas asfálticas, pinturas impermeabilizantes e tratamentos de umidade",
    ),
    (
        "Instalações Elétricas",
        "Eletrodutos, fiação, quadros de distribuição, tomadas e luminárias",
    ),
    (
        "Instalações Hidrossanitárias",
        "Água fria e quente, esgoto, ralos, registros e caixas de inspeção",
    ),
    (
        "Esquadrias",
        "Portas, janelas, vidros e ferragens",
    ),
    (
        "Revestimentos de Parede",
        "Chapisco, reboco, emboço, azulejos e cerâmicas de parede",
    ),
    (
        "Pisos",
        "Contrapiso, cerâmica, porcelanato, granito e rodapés",
    ),
    (
        "Forros",
        "Forros de gesso, PVC e madeira, incluindo tabicas e molduras",
    ),
    (
        "Pintura",
        "Selador, massa corrida, tinta látex, acrílica e esmalte",
    ),
    (
        "Louças e Metais",
        "Bacias, lavatórios, tanques, torneiras e acessórios sanitários",
    ),
    (
        "Serviços Complementares e Limpeza",
        "Arremates finais, limpeza da obra e entrega",
    ),
];

/// Insert the seeded catalog, skipping names that already exist. Safe to run
/// at every startup.
pub async fn seed_default_groups(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for (name, description) in DEFAULT_GROUPS {
        sqlx::query("INSERT OR IGNORE INTO groups (name, description) VALUES (?, ?)")
            .bind(name)
            .bind(description)
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Resolve a group name to its id, creating the row if absent.
///
/// Insert-or-ignore followed by lookup, so two concurrent creators race
/// safely to the same row instead of colliding on the unique name.
/// Runs on a connection so it can participate in a caller's transaction.
pub async fn ensure_group(conn: &mut SqliteConnection, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO groups (name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    let (id,): (i64,) = sqlx::query_as("SELECT id FROM groups WHERE name = ?")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    Ok(id)
}

/// All groups, alphabetical.
pub async fn list_groups(pool: &SqlitePool) -> Result<Vec<GroupRow>, sqlx::Error> {
    sqlx::query_as::<_, GroupRow>("SELECT id, name, description FROM groups ORDER BY name")
        .fetch_all(pool)
        .await
}

/// Group catalog as name → description, the shape the classifier consumes.
pub async fn group_catalog(pool: &SqlitePool) -> Result<BTreeMap<String, String>, sqlx::Error> {
    let rows = list_groups(pool).await?;
    Ok(rows
        .into_iter()
        .map(|g| (g.name, g.description.unwrap_or_default()))
        .collect())
}

#[cfg(test)]
#[path = "tests/group_repo_test.rs"]
mod tests;
