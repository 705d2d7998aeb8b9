// Candidate phrases for a round. One is picked uniformly at random by
// `GameController::start_round`. Mixed-case for display; matching is
// case-insensitive, so casing here is purely cosmetic.

pub static PHRASES: [&str; 5] = [
    "Money Does Not Grow On Trees",
    "Dropping Like Flies",
    "Right Off the Bat",
    "Back To the Drawing Board",
    "Par For the Course",
];
