use nyayadoot_types::Stage;

/// Prompts shown before the first answer of a run
pub const WELCOME_PROMPTS: [&str; 4] = [
    "My car was stolen yesterday",
    "I need to know about starting a business in India",
    "I'm having an issue with my landlord",
    "What are my rights in a contract dispute?",
];

/// Follow-up prompts for a conversation stage
pub fn prompts_for(stage: Stage) -> [&'static str; 4] {
    match stage {
        Stage::Initial => [
            "My car was stolen yesterday",
            "I'm having an issue with my landlord",
            "I need help with a contract dispute",
            "Someone is threatening to sue me",
        ],
        Stage::Details => [
            "What legal sections apply to my situation?",
            "Are there any relevant court cases?",
            "What are my legal options?",
            "What should I do next?",
        ],
        Stage::Sections => [
            "Can you explain these sections in simpler terms?",
            "How do these laws apply to my case?",
            "Are there any relevant court cases?",
            "What's the practical impact of these laws?",
        ],
        Stage::Cases => [
            "How do these cases affect my situation?",
            "What sections of law were applied in these cases?",
            "What was the final outcome in these cases?",
            "What are the implications for my case?",
        ],
        Stage::Impact => [
            "What steps should I take next?",
            "What documentation do I need?",
            "Are there any deadlines I should be aware of?",
            "Should I consult a lawyer about this?",
        ],
        Stage::Followup => [
            "Yes, I've filed an FIR",
            "No, I haven't reported it yet",
            "What sections of law apply to my case?",
            "What steps should I take next?",
        ],
    }
}

/// Follow-up prompts for a raw stage label; unknown labels get the `initial` set
pub fn suggestions_for(label: Option<&str>) -> [&'static str; 4] {
    prompts_for(Stage::from_label(label))
}
