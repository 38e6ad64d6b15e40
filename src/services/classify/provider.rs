//! External semantic-classification port and its HTTP implementation.
//!
//! The collaborator may be slow, rate-limited or down entirely, so every
//! failure is reported as `Err(String)` and absorbed by the
//! suggester: classification is best-effort and never fails a mapping workflow.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Bound on a single classification round-trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimum spacing between consecutive calls, to respect provider limits.
const MIN_CALL_INTERVAL: Duration = Duration::from_millis(1200);

/// Capability interface for the external classifier: given an item name and
/// the group catalog (name → description), return the chosen group name as
/// free text.
pub trait ClassificationPort: Send + Sync {
    fn classify(
        &self,
        item_name: &str,
        groups: &BTreeMap<String, String>,
    ) -> Result<String, String>;
}

pub struct HttpClassificationProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    last_call: Mutex<Option<Instant>>,
}

impl HttpClassificationProvider {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string()),
            model: model.unwrap_or_else(|| "gpt-4o-mini".to_string()),
            last_call: Mutex::new(None),
        }
    }

    /// Build the provider from the environment (`OPENAI_API_KEY`, optional
    /// `SIO_CLASSIFIER_URL` and `SIO_CLASSIFIER_MODEL`), reading `.env` if
    /// present. Returns `None` when no key is configured; the suggester
    /// then degrades to its deterministic path for the life of the process.
    pub fn from_env() -> Option<Self> {
        let _ = dotenvy::dotenv();
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        Some(Self::new(
            api_key,
            std::env::var("SIO_CLASSIFIER_URL").ok(),
            std::env::var("SIO_CLASSIFIER_MODEL").ok(),
        ))
    }

    fn respect_rate_limit(&self) {
        let mut last = self.last_call.lock().unwrap();
        if let Some(at) = *last {
            let elapsed = at.elapsed();
            if elapsed < MIN_CALL_INTERVAL {
                std::thread::sleep(MIN_CALL_INTERVAL - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// Prompt: the item, the enumerated group catalog, and a few worked examples.
/// The reply contract is a single line containing exactly one group name.
fn build_prompt(item_name: &str, groups: &BTreeMap<String, String>) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Você é um assistente de orçamentos de construção civil. \
         Classifique o serviço abaixo em exatamente um dos grupos listados. \
         Responda com uma única linha contendo apenas o nome do grupo, \
         sem pontuação extra e sem explicações.\n\n",
    );

    prompt.push_str("## Grupos disponíveis\n");
    for (name, description) in groups {
        if description.is_empty() {
            prompt.push_str(&format!("- {name}\n"));
        } else {
            prompt.push_str(&format!("- {name}: {description}\n"));
        }
    }

    prompt.push_str(
        "\n## Exemplos\n\
         Serviço: \"Reboco interno de parede\" → Revestimentos de Parede\n\
         Serviço: \"Tomada 2P+T 10A completa\" → Instalações Elétricas\n\
         Serviço: \"Escavação manual de vala\" → Movimento de Terra\n\n",
    );

    prompt.push_str(&format!("Serviço: \"{item_name}\"\nGrupo:"));
    prompt
}

impl ClassificationPort for HttpClassificationProvider {
    fn classify(
        &self,
        item_name: &str,
        groups: &BTreeMap<String, String>,
    ) -> Result<String, String> {
        if groups.is_empty() {
            return Err("no groups to classify against".to_string());
        }

        self.respect_rate_limit();

        let payload = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(item_name, groups),
            }],
            temperature: 0.0,
        };

        let res = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| format!("HTTP request failed: {e}"))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().unwrap_or_default();
            return Err(format!("API error {status}: {text}"));
        }

        let chat_res: ChatResponse = res
            .json()
            .map_err(|e| format!("Failed to parse JSON response: {e}"))?;

        let content = chat_res
            .choices
            .first()
            .ok_or("No choices in classifier response")?
            .message
            .content
            .trim();

        // The contract is one line; keep only the first if the model rambles.
        let reply = content.lines().next().unwrap_or("").trim().to_string();
        if reply.is_empty() {
            return Err("empty classifier reply".to_string());
        }
        Ok(reply)
    }
}
