use rand::RngExt;

use crate::models::FaqEntry;

pub const GREETING: &str = "Hi there! 👋 I'm your Campus Buddy. How can I help you today?";

const THANKS_REPLY: &str = "You're welcome! Anything else I can help with? 😊";
const FAREWELL_REPLY: &str = "Bye for now! Remember, I'm here whenever you need assistance. 👋";
const JOKE_REPLY: &str =
    "Why don't scientists trust atoms? Because they make up everything! 😂";
const DEFAULT_REPLY: &str = "I'm not sure how to respond to that. You can ask me about your \
                             grades, black marks, timetable, syllabus, or upcoming events! 🎓";

/// What a keyword trigger answers with. The stress trigger re-picks a quote
/// every time it fires.
#[derive(Debug, Clone)]
pub enum KeywordReply {
    Fixed(String),
    MotivationalQuote,
}

#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub trigger: String,
    pub reply: KeywordReply,
}

/// Read-only reply tables. `Default` carries the portal's original tables;
/// declaration order is load-bearing for the keyword scan.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub keywords: Vec<KeywordRule>,
    pub faqs: Vec<FaqEntry>,
    pub quotes: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        let fixed = |trigger: &str, reply: &str| KeywordRule {
            trigger: trigger.to_string(),
            reply: KeywordReply::Fixed(reply.to_string()),
        };

        Self {
            keywords: vec![
                fixed("hello", "Hey there! How can I help you today? 😊"),
                fixed("hi", "Hello! What can I assist you with? 🙌"),
                fixed(
                    "help",
                    "I'm here to help! You can ask me about your grades, black marks, upcoming \
                     events, or just chat if you're feeling stressed.",
                ),
                fixed(
                    "black marks",
                    "Black marks are assigned for violations of college rules. You accrue points \
                     based on severity. 10 points triggers a review, and 15 may lead to \
                     suspension.",
                ),
                fixed(
                    "syllabus",
                    "You can find your course syllabus in the Syllabus tab. It shows your \
                     progress through each topic!",
                ),
                fixed(
                    "timetable",
                    "Your personal timetable is available in the Timetable tab. It shows all \
                     your scheduled classes and their locations.",
                ),
                fixed(
                    "grades",
                    "All your grades are accessible through the Dashboard. You can see a \
                     breakdown by course and assignment.",
                ),
                KeywordRule {
                    trigger: "i'm stressed".to_string(),
                    reply: KeywordReply::MotivationalQuote,
                },
                fixed(
                    "events",
                    "Check out the Events tab for upcoming campus events! You can RSVP directly \
                     through the platform.",
                ),
                fixed(
                    "competitions",
                    "Interested in competitions? Visit the Competitions tab to see what's \
                     coming up and register for those you want to join.",
                ),
            ],
            faqs: default_faqs(),
            quotes: default_quotes(),
        }
    }
}

pub fn default_faqs() -> Vec<FaqEntry> {
    let faq = |question: &str, answer: &str| FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    };

    vec![
        faq(
            "How many black marks before suspension?",
            "Accumulating 10 black marks in a semester may lead to academic probation, while 15 \
             black marks could result in suspension. The severity of each mark is also taken \
             into consideration.",
        ),
        faq(
            "Where can I find my syllabus?",
            "Your course syllabi can be found in the Syllabus tab on your student dashboard. \
             Each course has a detailed breakdown of topics and completion status.",
        ),
        faq(
            "How to appeal a black mark?",
            "To appeal a black mark, go to the Black Marks section, select the mark in \
             question, and click on the \"Appeal\" button. Provide a clear explanation for your \
             appeal.",
        ),
        faq(
            "When are final exams scheduled?",
            "Final exam schedules are posted in the Timetable section, typically 4 weeks before \
             the exam period begins.",
        ),
        faq(
            "How do I submit anonymous feedback?",
            "Navigate to the Feedback section, choose the target (faculty, course, or college), \
             write your feedback, and check the \"Anonymous\" option before submitting.",
        ),
    ]
}

pub fn default_quotes() -> Vec<String> {
    [
        "The best way to predict your future is to create it.",
        "Success is not final, failure is not fatal: It is the courage to continue that counts.",
        "Your time is limited, don't waste it living someone else's life.",
        "The future belongs to those who believe in the beauty of their dreams.",
        "The only way to do great work is to love what you do.",
        "Believe you can and you're halfway there.",
        "Don't watch the clock; do what it does. Keep going.",
        "The secret of getting ahead is getting started.",
        "It's not about having time, it's about making time.",
        "You are never too old to set another goal or to dream a new dream.",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Uniform index source for the quote pick, substitutable in tests.
pub trait RandomSource {
    fn pick(&mut self, len: usize) -> usize;
}

pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn pick(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

pub struct Responder {
    config: ChatConfig,
    random: Box<dyn RandomSource>,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(ChatConfig::default(), Box::new(ThreadRngSource))
    }
}

impl Responder {
    pub fn new(config: ChatConfig, random: Box<dyn RandomSource>) -> Self {
        Self { config, random }
    }

    /// Fixed-priority cascade: keyword table, FAQ word overlap, generic
    /// fallbacks, then the default reply. First match wins at every stage.
    pub fn respond(&mut self, text: &str) -> String {
        let input = text.to_lowercase();

        for rule in self.config.keywords.iter() {
            if input.contains(&rule.trigger) {
                return match &rule.reply {
                    KeywordReply::Fixed(reply) => reply.clone(),
                    KeywordReply::MotivationalQuote => {
                        let index = self.random.pick(self.config.quotes.len());
                        let quote = &self.config.quotes[index];
                        format!(
                            "It's okay to feel that way sometimes. Remember: \"{quote}\" 💪 \
                             Consider taking a short break or talking to a friend."
                        )
                    }
                };
            }
        }

        for faq in self.config.faqs.iter() {
            let question = faq.question.to_lowercase();
            let words: Vec<&str> = question.split(' ').collect();
            let matched = words.iter().filter(|word| input.contains(*word)).count();

            // Strictly more than half the question's words must appear.
            if matched * 2 > words.len() {
                return faq.answer.clone();
            }
        }

        if input.contains("thank") {
            return THANKS_REPLY.to_string();
        }

        if input.contains("bye") || input.contains("goodbye") {
            return FAREWELL_REPLY.to_string();
        }

        if input.contains("joke") || input.contains("funny") {
            return JOKE_REPLY.to_string();
        }

        DEFAULT_REPLY.to_string()
    }
}
