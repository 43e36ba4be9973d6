//! Preference capture and the hand-off to path generation

use uuid::Uuid;

use super::App;
use super::error::FlowError;
use super::generate::GenerationStage;
use super::state::{Notice, Screen, Transition};
use crate::ai::{GeneratePathRequest, LearningBackend};
use crate::model::{LearningGoal, NewPreference, Preference, PreferredFormat, SkillLevel};
use crate::store::TableStore;

/// Stages of the onboarding form, in order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WizardStage {
    #[default]
    Topic,
    SkillLevel,
    Goal,
    Format,
    Time,
}

impl WizardStage {
    pub fn all() -> &'static [WizardStage] {
        &[Self::Topic, Self::SkillLevel, Self::Goal, Self::Format, Self::Time]
    }

    /// 1-based position, for "step n of 5"
    pub fn number(&self) -> usize {
        Self::all().iter().position(|s| s == self).map_or(1, |i| i + 1)
    }

    pub fn question(&self) -> &'static str {
        match self {
            Self::Topic => "What do you want to learn?",
            Self::SkillLevel => "What's your current skill level?",
            Self::Goal => "What's your learning goal?",
            Self::Format => "How do you prefer to learn?",
            Self::Time => "How much time can you dedicate?",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::Topic => "Enter any topic, skill, or subject",
            Self::SkillLevel => "This helps us tailor the difficulty",
            Self::Goal => "We'll optimize your path accordingly",
            Self::Format => "Choose your preferred learning format",
            Self::Time => "We'll pace your learning journey",
        }
    }

    fn next(self) -> Option<Self> {
        Self::all().get(self.number()).copied()
    }

    fn previous(self) -> Option<Self> {
        self.number().checked_sub(2).and_then(|i| Self::all().get(i).copied())
    }
}

/// Onboarding form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingForm {
    stage: WizardStage,
    pub topic: String,
    pub skill_level: SkillLevel,
    pub learning_goal: LearningGoal,
    pub preferred_format: PreferredFormat,
    hours_per_day: u32,
    days_per_week: u32,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            stage: WizardStage::Topic,
            topic: String::new(),
            skill_level: SkillLevel::Beginner,
            learning_goal: LearningGoal::PersonalInterest,
            preferred_format: PreferredFormat::Mixed,
            hours_per_day: 1,
            days_per_week: 5,
        }
    }
}

impl OnboardingForm {
    pub const HOURS_PER_DAY: std::ops::RangeInclusive<u32> = 1..=8;
    pub const DAYS_PER_WEEK: std::ops::RangeInclusive<u32> = 1..=7;

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn is_last_stage(&self) -> bool {
        self.stage.next().is_none()
    }

    pub fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    pub fn days_per_week(&self) -> u32 {
        self.days_per_week
    }

    pub fn set_hours_per_day(&mut self, hours: u32) -> Result<(), FlowError> {
        if !Self::HOURS_PER_DAY.contains(&hours) {
            return Err(FlowError::Invalid("Hours per day must be between 1 and 8".into()));
        }
        self.hours_per_day = hours;
        Ok(())
    }

    pub fn set_days_per_week(&mut self, days: u32) -> Result<(), FlowError> {
        if !Self::DAYS_PER_WEEK.contains(&days) {
            return Err(FlowError::Invalid("Days per week must be between 1 and 7".into()));
        }
        self.days_per_week = days;
        Ok(())
    }

    /// Advance one stage. Leaving the topic stage requires a topic.
    pub fn next(&mut self) -> Result<WizardStage, FlowError> {
        if self.stage == WizardStage::Topic {
            self.validate()?;
        }
        if let Some(next) = self.stage.next() {
            self.stage = next;
        }
        Ok(self.stage)
    }

    /// Go back one stage, staying put on the first
    pub fn back(&mut self) -> WizardStage {
        if let Some(previous) = self.stage.previous() {
            self.stage = previous;
        }
        self.stage
    }

    pub fn validate(&self) -> Result<(), FlowError> {
        if self.topic.trim().is_empty() {
            return Err(FlowError::Invalid(
                "Topic required: please enter what you want to learn".into(),
            ));
        }
        Ok(())
    }

    pub fn to_new_preference(&self, user_id: Uuid) -> NewPreference {
        NewPreference {
            user_id,
            topic: self.topic.trim().to_string(),
            skill_level: self.skill_level,
            learning_goal: self.learning_goal,
            preferred_format: self.preferred_format,
            hours_per_day: self.hours_per_day,
            days_per_week: self.days_per_week,
        }
    }
}

impl<S, B> App<S, B>
where
    S: TableStore,
    B: LearningBackend + 'static,
{
    /// Save the preference and generate a path from it
    ///
    /// Failures return to onboarding. A generation failure after the
    /// preference was saved reports the orphaned preference id.
    pub async fn submit_onboarding(
        &self,
        form: &OnboardingForm,
        on_stage: &mut (dyn FnMut(GenerationStage) + Send),
    ) -> Transition {
        let back = Transition::to(Screen::Onboarding { orphaned_preference: None });

        let user_id = match self.require_user() {
            Ok(user_id) => user_id,
            Err(e) => return back.with_notice(Notice::error(e.to_string())),
        };

        if let Err(e) = form.validate() {
            return back.with_notice(Notice::error(e.to_string()));
        }

        let new_preference = form.to_new_preference(user_id);
        let preference = match self.store.insert_preference(&new_preference).await {
            Ok(preference) => preference,
            Err(e) => {
                tracing::warn!("Saving preferences failed: {}", e);
                return back.with_notice(
                    Notice::error("Error saving preferences").with_description(e.to_string()),
                );
            }
        };

        self.generate_from(&preference, on_stage).await
    }

    /// Generate a path for an already stored preference
    pub async fn retry_generation(
        &self,
        preference_id: Uuid,
        on_stage: &mut (dyn FnMut(GenerationStage) + Send),
    ) -> Transition {
        let back = Transition::to(Screen::Onboarding { orphaned_preference: Some(preference_id) });

        if let Err(e) = self.require_user() {
            return back.with_notice(Notice::error(e.to_string()));
        }

        match self.store.get_preference(preference_id).await {
            Ok(Some(preference)) => self.generate_from(&preference, on_stage).await,
            Ok(None) => {
                back.with_notice(Notice::error(FlowError::NotFound("Preference").to_string()))
            }
            Err(e) => back.with_notice(Notice::error(e.to_string())),
        }
    }

    async fn generate_from(
        &self,
        preference: &Preference,
        on_stage: &mut (dyn FnMut(GenerationStage) + Send),
    ) -> Transition {
        match self.generator.generate_path(GeneratePathRequest::from(preference), on_stage).await {
            Ok(generated) => Transition::to(Screen::Path(generated.path_id)).with_notice(
                Notice::info("Learning path created!")
                    .with_description(format!("{} steps ready for you", generated.steps_count)),
            ),
            Err(e) => {
                tracing::warn!("Generation failed; preference {} has no path", preference.id);
                Transition::to(Screen::Onboarding { orphaned_preference: Some(preference.id) })
                    .with_notice(Notice::error("Generation failed").with_description(e.to_string()))
            }
        }
    }
}
