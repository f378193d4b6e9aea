//! Legacy keyword-matched canned responder
//!
//! Stateless stand-in for the real answerer: picks a category by lower-cased
//! substring match and returns a random canned reply from it after a short
//! simulated delay.

use super::types::{Answer, AnswerOptions};
use super::{AnswerError, Answerer};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

/// A reply category and the keywords that select it
struct Category {
    name: &'static str,
    keywords: &'static [&'static str],
    replies: &'static [&'static str],
}

// Checked in order; first category with a matching keyword wins.
const CATEGORIES: &[Category] = &[
    Category {
        name: "greetings",
        keywords: &["hola", "hi", "hello"],
        replies: &[
            "¡Hola! Me alegra poder ayudarte. Soy tu asistente especializado en BASF.",
            "¡Bienvenido! Estoy aquí para responder tus preguntas sobre BASF y química.",
            "¡Hola! ¿En qué aspecto de BASF te gustaría que te ayude hoy?",
        ],
    },
    Category {
        name: "company",
        keywords: &["basf", "empresa", "compañía"],
        replies: &[
            "BASF es la empresa química líder en el mundo. Nuestro propósito corporativo es \"We create chemistry for a sustainable future\".",
            "BASF fue fundada en 1865 y tiene su sede en Ludwigshafen, Alemania. Operamos en más de 80 países.",
            "En BASF, nos enfocamos en la química inteligente que permite un futuro más sostenible. Nuestro concepto Verbund conecta plantas de producción, cadenas de valor y tecnologías.",
        ],
    },
    Category {
        name: "sustainability",
        keywords: &["sostenib", "medio ambiente", "verde", "co2"],
        replies: &[
            "La sostenibilidad está en el corazón de nuestra estrategia, desde materiales para vehículos eléctricos hasta productos para agricultura sostenible.",
            "Nuestro objetivo es lograr emisiones netas cero para 2050, invirtiendo en hidrógeno verde y procesos con bajas emisiones de CO2.",
            "Nuestros catalizadores para automóviles reducen las emisiones y nuestros materiales de construcción mejoran la eficiencia energética.",
        ],
    },
    Category {
        name: "products",
        keywords: &["producto", "químico", "material"],
        replies: &[
            "BASF produce químicos, materiales de rendimiento, soluciones industriales, tecnologías de superficie, nutrición y cuidado, y soluciones agrícolas.",
            "Nuestros productos van desde químicos básicos hasta soluciones especializadas para la industria automotriz, construcción, agricultura y farmacéutica.",
            "Algunos de nuestros productos más conocidos incluyen catalizadores, espumas, recubrimientos y soluciones para protección de cultivos.",
        ],
    },
    Category {
        name: "innovation",
        keywords: &["innovac", "investigac", "tecnolog", "futuro"],
        replies: &[
            "La innovación es clave para BASF. Invertimos aproximadamente €2 mil millones anuales en investigación y desarrollo.",
            "Nuestros centros de innovación colaboran con universidades, startups y otros socios para desarrollar soluciones del futuro.",
            "Trabajamos en baterías para vehículos eléctricos, producción digitalizada y nuevos materiales sostenibles.",
        ],
    },
];

const DEFAULT_REPLIES: &[&str] = &[
    "Esa es una excelente pregunta. Te recomiendo visitar nuestro sitio web oficial para obtener información más detallada y actualizada.",
    "¿Te gustaría saber más sobre algún área específica como sostenibilidad, productos o innovación?",
    "¿Hay algún sector o producto específico sobre el que te gustaría aprender más?",
];

/// Simulated reply delay range used unless overridden
pub const DEFAULT_KEYWORD_LATENCY: (Duration, Duration) =
    (Duration::from_secs(1), Duration::from_secs(3));

/// Canned responder selected by keyword
pub struct KeywordAnswerer {
    min_latency: Duration,
    max_latency: Duration,
}

impl Default for KeywordAnswerer {
    fn default() -> Self {
        let (min_latency, max_latency) = DEFAULT_KEYWORD_LATENCY;
        Self {
            min_latency,
            max_latency,
        }
    }
}

impl KeywordAnswerer {
    /// Override the simulated response delay range. `max` below `min` collapses to `min`.
    #[must_use]
    pub fn with_latency(mut self, min: Duration, max: Duration) -> Self {
        self.min_latency = min;
        self.max_latency = max.max(min);
        self
    }

    /// Category name and reply pool for a query
    fn replies_for(query: &str) -> (&'static str, &'static [&'static str]) {
        let lowered = query.to_lowercase();
        CATEGORIES
            .iter()
            .find(|c| c.keywords.iter().any(|k| lowered.contains(k)))
            .map_or(("default", DEFAULT_REPLIES), |c| (c.name, c.replies))
    }
}

#[async_trait]
impl Answerer for KeywordAnswerer {
    async fn answer(&self, query: &str, _options: &AnswerOptions) -> Result<Answer, AnswerError> {
        let (category, replies) = Self::replies_for(query);

        // ThreadRng is !Send, keep it out of the await below
        let (reply, delay) = {
            let mut rng = rand::thread_rng();
            let reply = replies.choose(&mut rng).copied().unwrap_or_default();
            let delay = if self.max_latency > self.min_latency {
                rng.gen_range(self.min_latency..=self.max_latency)
            } else {
                self.min_latency
            };
            (reply, delay)
        };

        tracing::debug!(category, delay_ms = %delay.as_millis(), "Keyword reply selected");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        Ok(Answer::text(reply))
    }

    fn strategy(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> KeywordAnswerer {
        KeywordAnswerer::default().with_latency(Duration::ZERO, Duration::ZERO)
    }

    #[test]
    fn test_category_selection() {
        assert_eq!(KeywordAnswerer::replies_for("Hola!").0, "greetings");
        assert_eq!(KeywordAnswerer::replies_for("¿Qué es BASF?").0, "company");
        assert_eq!(KeywordAnswerer::replies_for("emisiones de CO2").0, "sustainability");
        assert_eq!(KeywordAnswerer::replies_for("un producto nuevo").0, "products");
        assert_eq!(KeywordAnswerer::replies_for("investigación aplicada").0, "innovation");
        assert_eq!(KeywordAnswerer::replies_for("xyz").0, "default");
    }

    #[test]
    fn test_greeting_wins_over_later_categories() {
        assert_eq!(KeywordAnswerer::replies_for("hola, ¿qué productos venden?").0, "greetings");
    }

    #[tokio::test]
    async fn test_reply_comes_from_selected_pool() {
        let answer = instant()
            .answer("medio ambiente", &AnswerOptions::default())
            .await
            .unwrap();
        let (_, pool) = KeywordAnswerer::replies_for("medio ambiente");
        assert!(pool.contains(&answer.text.as_str()));
        assert!(answer.sources.is_empty());
        assert!(answer.context_locator.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_inverted_latency_range_uses_min() {
        let answerer = KeywordAnswerer::default()
            .with_latency(Duration::from_millis(300), Duration::from_millis(100));
        let start = tokio::time::Instant::now();
        answerer.answer("xyz", &AnswerOptions::default()).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(310));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency_is_within_range() {
        let answerer = KeywordAnswerer::default()
            .with_latency(Duration::from_millis(100), Duration::from_millis(200));
        let start = tokio::time::Instant::now();
        answerer.answer("xyz", &AnswerOptions::default()).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed <= Duration::from_millis(250));
    }
}
