//! Drives the policy the way a tree search does: expand, pick, execute,
//! back up with the final reward, until the depth limit forces the overall
//! question.

use std::sync::Arc;

use ladder_core::domain::{
    DecompositionTemplate, IndexedPattern, PolicyConfig, RewardComponents, UsefulnessTemplate,
};
use ladder_core::impls::ScriptedModel;
use ladder_core::{
    Action, DecompositionPolicy, ErrorKind, PolicyBuilder, PolicyError, ReasoningState,
    SearchConfig, SubStep,
};

const QUESTION: &str = "Is Paris the capital of France?";
const PREFIX: &str = "Now we can answer the question:";

fn templates() -> (DecompositionTemplate, UsefulnessTemplate) {
    let p = |raw: &str| IndexedPattern::parse(raw).unwrap();
    (
        DecompositionTemplate {
            decomposition: "Decompose the question.".into(),
            input: "Answer with sub-questions.\n\n".into(),
            question_prefix: "Question 1: ".into(),
            subquestion_prefix: p("Question 1.{}:"),
            answer_prefix: p("Answer 1.{}:"),
            overall_question_prefix: PREFIX.into(),
        },
        UsefulnessTemplate {
            input: "Is the last question useful?\n\n".into(),
            question_prefix: "Question 1: ".into(),
            subquestion_prefix: p("Question 1.{}:"),
            new_subquestion_prefix: p("New question 1.{}:"),
            useful_prefix: "Is the new question useful?".into(),
        },
    )
}

fn policy(model: Arc<ScriptedModel>, config: PolicyConfig) -> DecompositionPolicy {
    let (decomposition, usefulness) = templates();
    let mut policy = PolicyBuilder::new()
        .config(config)
        .decomposition(decomposition)
        .usefulness(usefulness)
        .model(model)
        .build()
        .unwrap();
    policy.update_example(QUESTION);
    policy
}

#[tokio::test]
async fn first_step_scenario() {
    let model = Arc::new(
        ScriptedModel::new().with_generations([r#"["Is Paris a city in France?", "..."]"#]),
    );
    let config = PolicyConfig {
        n_actions: 1,
        ..PolicyConfig::default()
    };
    let p = policy(model, config);

    let actions = p.propose(&ReasoningState::new()).await.unwrap();
    assert_eq!(actions, vec![Action::from("Is Paris a city in France?")]);
}

#[tokio::test]
async fn greedy_rollout_reaches_overall_question() {
    let model = Arc::new(
        ScriptedModel::new()
            .with_generations([
                // depth 0: two first-step lists
                r#""What is the capital of France?", "Is Paris big?"."#,
                r#""Where is Paris?"."#,
                // depth 1: two samples
                "Is the capital the seat of government?",
                "Is the capital the seat of government?",
                // depth 2: forced, one greedy sample
                "Is Paris France's capital?",
            ])
            .with_logits_for("New question 1.1: What is the capital of France?", [3.0, 0.0])
            .with_logits_for("New question 1.1: Where is Paris?", [0.0, 3.0]),
    );
    let config = PolicyConfig {
        n_actions: 2,
        batch_size: 1,
        depth_limit: 3,
        ..PolicyConfig::default()
    };
    let p = policy(model.clone(), config);

    let mut state = ReasoningState::new();
    let mut backups = Vec::new();
    loop {
        let scored = p.score_actions(&state).await.unwrap();
        assert!(!scored.is_empty());

        // First maximum wins so ties break on proposal order.
        let best = scored
            .iter()
            .fold(None::<&ladder_core::ScoredAction>, |acc, s| match acc {
                Some(b) if b.fast_reward >= s.fast_reward => Some(b),
                _ => Some(s),
            })
            .unwrap()
            .clone();

        // The state transition would answer the sub-question here.
        let confidence = 0.9;
        state = state.appended(
            SubStep::new(best.action.as_str(), "An answer.").with_confidence(confidence),
        );

        let (reward, components) = p
            .reward(&state, &best.action, Some(best.components.r_useful), Some(confidence))
            .unwrap();
        assert_eq!(
            components,
            RewardComponents::useful(best.components.r_useful).with_confidence(confidence)
        );
        assert_eq!(components.reward(p.combiner()), reward);
        backups.push(reward);

        if best.action.as_str().starts_with(PREFIX) {
            assert_eq!(scored.len(), 1);
            break;
        }
    }

    let chain: Vec<&str> = state.iter().map(|s| s.sub_question.as_str()).collect();
    assert_eq!(
        chain,
        vec![
            "What is the capital of France?",
            "Is the capital the seat of government?",
            "Now we can answer the question: Is Paris the capital of France?",
        ]
    );
    assert_eq!(backups.len(), 3);
    assert_eq!(model.remaining_generations().await, 0);

    let sizes: Vec<usize> = model
        .generate_calls()
        .await
        .iter()
        .map(|c| c.prompts.len())
        .collect();
    assert_eq!(sizes, vec![1, 1, 1, 1, 1]);
}

#[tokio::test]
async fn restated_question_collapses_to_one_action() {
    let model = Arc::new(ScriptedModel::new().with_generations([
        "Is Paris the capital of France?",
        "is paris the capital of france?",
    ]));
    let config = PolicyConfig {
        n_actions: 2,
        ..PolicyConfig::default()
    };
    let p = policy(model, config);
    let state: ReasoningState = vec![SubStep::new("Where is Paris?", "In France.")].into();

    let actions = p.propose(&state).await.unwrap();
    assert_eq!(actions, vec![Action::new(format!("{PREFIX} {QUESTION}"))]);
}

#[tokio::test]
async fn final_reward_without_components_is_a_precondition_error() {
    let p = policy(Arc::new(ScriptedModel::new()), PolicyConfig::default());
    let action = Action::from("Where is Paris?");

    for (r_useful, r_conf) in [(None, Some(0.5)), (Some(0.5), None), (None, None)] {
        let err: PolicyError = p
            .reward(&ReasoningState::new(), &action, r_useful, r_conf)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }
}
