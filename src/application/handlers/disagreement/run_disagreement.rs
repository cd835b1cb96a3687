//! RunDisagreementHandler - Command handler that challenges a decision.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::disagreement::{
    AnalysisMode, BiasDetector, BiasReport, Counterargument, CounterargumentGenerator, Decision,
    DisagreementError, DisagreementReport, ImpactAnalyzer, IntentDecoder,
    RecommendationAdvisor, StructuredIntent, DEVILS_ADVOCATE_SYSTEM_PROMPT,
};
use crate::domain::foundation::{ReportId, Timestamp};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole};

/// Default completion budget for live counterarguments.
pub const DEFAULT_MAX_TOKENS: u32 = 300;
/// Default sampling temperature for live counterarguments.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default wall-clock budget for the live call, retries included.
pub const DEFAULT_LIVE_TIMEOUT: Duration = Duration::from_secs(25);

/// Command to challenge a decision.
#[derive(Debug, Clone)]
pub struct RunDisagreementCommand {
    pub decision: String,
    pub context: Option<String>,
}

impl RunDisagreementCommand {
    pub fn new(decision: impl Into<String>, context: Option<String>) -> Self {
        Self {
            decision: decision.into(),
            context,
        }
    }
}

/// Handler running the five-stage disagreement pipeline.
///
/// With no provider every run is in mock mode. With a provider, any failure,
/// unusable completion, or call outliving `live_timeout` falls back to the
/// mock templates. Keep `live_timeout` below the HTTP request timeout.
pub struct RunDisagreementHandler {
    provider: Option<Arc<dyn AIProvider>>,
    max_tokens: u32,
    temperature: f32,
    live_timeout: Duration,
}

impl RunDisagreementHandler {
    pub fn new(provider: Option<Arc<dyn AIProvider>>) -> Self {
        Self {
            provider,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            live_timeout: DEFAULT_LIVE_TIMEOUT,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_live_timeout(mut self, live_timeout: Duration) -> Self {
        self.live_timeout = live_timeout;
        self
    }

    /// "live" when a provider is configured, otherwise "mock".
    pub fn mode_label(&self) -> &'static str {
        if self.provider.is_some() {
            "live"
        } else {
            "mock"
        }
    }

    /// Provider name and model, if one is configured.
    pub fn provider_info(&self) -> Option<crate::ports::ProviderInfo> {
        self.provider.as_ref().map(|p| p.provider_info())
    }

    pub async fn handle(
        &self,
        cmd: RunDisagreementCommand,
    ) -> Result<DisagreementReport, DisagreementError> {
        // 1. Validate
        let decision = Decision::new(&cmd.decision, cmd.context.as_deref())?;
        let id = ReportId::new();

        // 2. Decode intent and detect bias
        let intent = IntentDecoder::decode(&decision);
        let bias = BiasDetector::detect(&intent);
        tracing::debug!(
            report_id = %id,
            action = %intent.action,
            biases = ?bias.flags,
            "Decoded decision"
        );

        // 3. Counterarguments, live when possible
        let (counterarguments, mode) = self.counterarguments(id, &intent, &bias).await;

        // 4. Impacts and recommendations
        let impacts = ImpactAnalyzer::analyze(&intent);
        let recommendations = RecommendationAdvisor::recommend(&counterarguments, &impacts);

        tracing::info!(
            report_id = %id,
            mode = %mode.label(),
            counterarguments = counterarguments.len(),
            "Disagreement report generated"
        );

        Ok(DisagreementReport {
            id,
            mode,
            intent,
            bias,
            counterarguments,
            impacts,
            recommendations,
            generated_at: Timestamp::now(),
        })
    }

    async fn counterarguments(
        &self,
        id: ReportId,
        intent: &StructuredIntent,
        bias: &BiasReport,
    ) -> (Vec<Counterargument>, AnalysisMode) {
        let Some(provider) = &self.provider else {
            return (CounterargumentGenerator::templates(), AnalysisMode::Mock);
        };

        match self.generate_live(&**provider, id, intent, bias).await {
            Ok(live) => live,
            Err(e) => {
                tracing::warn!(report_id = %id, "Live counterarguments failed, using mock templates: {}", e);
                (CounterargumentGenerator::templates(), AnalysisMode::Mock)
            }
        }
    }

    async fn generate_live(
        &self,
        provider: &dyn AIProvider,
        id: ReportId,
        intent: &StructuredIntent,
        bias: &BiasReport,
    ) -> Result<(Vec<Counterargument>, AnalysisMode), AIError> {
        let prompt = CounterargumentGenerator::prompt_for(intent, bias);
        tracing::debug!(
            report_id = %id,
            estimated_prompt_tokens = provider.estimate_tokens(&prompt),
            "Requesting live counterarguments"
        );

        let request = CompletionRequest::new(id.to_string())
            .with_system_prompt(DEVILS_ADVOCATE_SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        let response = tokio::time::timeout(self.live_timeout, provider.complete(request))
            .await
            .map_err(|_| AIError::Timeout {
                timeout_secs: self.live_timeout.as_secs() as u32,
            })??;
        let parsed = CounterargumentGenerator::parse_completion(&response.content);
        if parsed.is_empty() {
            return Err(AIError::parse("completion contained no counterarguments"));
        }

        tracing::debug!(
            report_id = %id,
            total_tokens = response.usage.total_tokens,
            cost_cents = response.usage.estimated_cost_cents,
            "Live counterarguments received"
        );

        let mode = AnalysisMode::Live {
            provider: provider.provider_info().name,
            model: response.model,
        };
        Ok((parsed, mode))
    }
}
