use crate::models::ChatContext;

enum Trigger {
    /// Any keyword appears anywhere in the message.
    Any(&'static [&'static str]),
    /// Every keyword appears somewhere in the message.
    All(&'static [&'static str]),
    /// Any keyword appears as a whole word.
    Word(&'static [&'static str]),
}

struct Rule {
    trigger: Trigger,
    unless: &'static [&'static str],
    replies: &'static [&'static str],
}

const HYDRATION: &[&str] = &["hydrat", "water"];

const RULES: &[Rule] = &[
    Rule {
        trigger: Trigger::Any(&["diet", "food", "nutrition", "meal"]),
        unless: HYDRATION,
        replies: &[
            "Nutrition is 70% of fitness! Focus on lean proteins (chicken, fish, beans), complex carbs (oats, quinoa), healthy fats (avocado, nuts) and lots of vegetables. What's your dietary preference?",
            "For a healthy diet: eat every 3-4 hours, include protein in each meal, drink 8-10 glasses of water daily and limit processed foods. Any specific nutrition goals?",
            "Meal prep on Sundays, eat colorful vegetables, choose whole grains over refined ones and keep fruit or nuts around for snacks. Do you have any food allergies?",
        ],
    },
    Rule {
        trigger: Trigger::Word(&["hi", "hello", "hey"]),
        unless: &[],
        replies: &[
            "Hello! I'm your personal fitness assistant. What are your fitness goals today?",
            "Hi there! Ready to crush your fitness goals? What can I help you with?",
            "Hey! I'm here to help you on your fitness journey. What would you like to know?",
        ],
    },
    Rule {
        trigger: Trigger::Any(&[
            "best time",
            "when to workout",
            "time to exercise",
            "workout time",
        ]),
        unless: &[],
        replies: &[
            "Morning sessions (6-8am) boost metabolism all day, evening sessions (4-6pm) catch your body temperature at its peak. Avoid the 2-3 hours before bed. What fits your schedule?",
            "Timing depends on your goals. Mornings help consistency, evenings help performance. The best time is the one you can stick to!",
        ],
    },
    Rule {
        trigger: Trigger::All(&["friday", "workout"]),
        unless: &[],
        replies: &[
            "Friday is perfect for cardio! Try 20-30 minutes of running or cycling, 15 minutes of HIIT (30s work, 30s rest) or a dance workout. What's your preferred cardio activity?",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["beginner", "start", "new"]),
        unless: &[],
        replies: &[
            "Great that you're starting! Begin with 3 days a week and focus on form over intensity: squats, push-ups and planks. Increase difficulty gradually. What's your main fitness goal?",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["hydrat", "water", "drink", "fluid"]),
        unless: &[],
        replies: &[
            "Stay hydrated! Drink 8-10 glasses of water daily and more during workouts. Light yellow urine and no constant thirst are good signs.",
            "Aim for half your body weight in ounces daily. During exercise drink 7-10oz every 10-20 minutes and add electrolytes for intense sessions.",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["workout", "exercise"]),
        unless: HYDRATION,
        replies: &[
            "Here's a solid routine: push-ups (3x8-12), squats (3x12-15), planks (3x30s) and a 20 minute walk. How often do you currently exercise?",
            "Try this full-body workout: burpees (3x5), lunges (3x10 each leg), mountain climbers (3x20), resting 1 minute between sets. What equipment do you have access to?",
            "An effective split: upper body Monday and Wednesday, lower body Tuesday and Thursday, cardio Friday, rest on weekends. Need specific exercises for any day?",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["weight loss", "lose weight", "fat"]),
        unless: &[],
        replies: &[
            "Weight loss comes from a calorie deficit, exercise and consistency. Aim for 1-2 lbs a week, combining cardio 4x a week with strength training 3x a week. What's your current activity level?",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["muscle", "gain", "build", "strength"]),
        unless: &[],
        replies: &[
            "Muscle building needs progressive overload, enough protein (0.8-1g per lb of bodyweight), 7-9 hours of sleep and compound lifts like squats, deadlifts and bench press. How many days can you train?",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["motivat", "lazy", "discipline", "consistent"]),
        unless: &[],
        replies: &[
            "Set small daily goals, track progress, find a workout buddy and reward yourself for milestones. Remember why you started!",
            "Build a routine and celebrate small wins. Discipline beats motivation, so make it a habit!",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["protein", "supplement", "creatine", "vitamin"]),
        unless: &[],
        replies: &[
            "Supplements help but aren't magic. The basics are protein powder if food falls short, creatine (3-5g daily), a multivitamin and fish oil. Focus on whole foods first.",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["injury", "pain", "hurt", "sore"]),
        unless: &[],
        replies: &[
            "Always warm up, keep proper form, don't ignore pain and rest enough. If you're injured, see a healthcare professional. Soreness is normal, sharp pain is not!",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["cardio", "running", "cycling", "swimming"]),
        unless: &[],
        replies: &[
            "Cardio improves heart health, burns calories and boosts mood. Aim for 150 minutes moderate or 75 minutes vigorous each week.",
            "Great cardio options: HIIT (20 min), steady-state (30-45 min) or fun activities like hiking and sports. What type of cardio do you enjoy most?",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["abs", "core", "belly", "stomach"]),
        unless: &[],
        replies: &[
            "Core workout: planks (3x30-60s), bicycle crunches (3x20), Russian twists (3x15), mountain climbers (3x20). Visible abs are made in the kitchen too!",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["stretch", "flexibility", "yoga"]),
        unless: &[],
        replies: &[
            "Do dynamic stretches before workouts and static stretches after, holding each for 15-30 seconds. Yoga helps both flexibility and focus. When do you usually stretch?",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["calories", "metabolism", "burn"]),
        unless: &[],
        replies: &[
            "Muscle burns more calories at rest, so strength training raises your metabolism while cardio burns calories during the session. Combine both for best results!",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["sleep", "rest", "recovery"]),
        unless: &[],
        replies: &[
            "Aim for 7-9 hours of sleep. Your body repairs muscle while you sleep, and poor sleep slows recovery and raises injury risk.",
        ],
    },
    Rule {
        trigger: Trigger::Any(&["stress", "anxiety", "mental"]),
        unless: &[],
        replies: &[
            "Exercise releases endorphins, lowers stress hormones and improves sleep. Even 10 minutes of walking or yoga helps!",
        ],
    },
];

impl Trigger {
    fn matches(&self, message: &str) -> bool {
        match self {
            Self::Any(keywords) => keywords.iter().any(|keyword| message.contains(keyword)),
            Self::All(keywords) => keywords.iter().all(|keyword| message.contains(keyword)),
            Self::Word(words) => message
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| words.contains(&token)),
        }
    }
}

/// Picks a coaching reply for `message`, using the goal from `context` when
/// no topic matches.
pub fn reply_for(message: &str, context: Option<&ChatContext>) -> String {
    let lowered = message.to_lowercase();
    let rule = RULES.iter().find(|rule| {
        rule.trigger.matches(&lowered) && !rule.unless.iter().any(|word| lowered.contains(word))
    });

    if let Some(rule) = rule {
        return pick(rule.replies, &lowered).to_string();
    }

    match context.and_then(user_goal) {
        Some(goal) => format!(
            "Good question about '{message}'! Since your goal is '{goal}', I can suggest workouts, nutrition, recovery or motivation tips that fit it. Which would help most?"
        ),
        None => format!(
            "Great question about '{message}'! I can help with workouts, nutrition, motivation, injury prevention, supplements and more. What specific fitness aspect interests you most?"
        ),
    }
}

/// Same message, same variant.
fn pick<'a>(replies: &[&'a str], message: &str) -> &'a str {
    let seed = message
        .bytes()
        .fold(0usize, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as usize));
    replies[seed % replies.len()]
}

fn user_goal(context: &ChatContext) -> Option<&str> {
    context
        .user_data
        .iter()
        .find(|(key, value)| key.eq_ignore_ascii_case("goal") && !value.is_empty())
        .map(|(_, value)| value.as_str())
}
