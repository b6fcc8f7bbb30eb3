use crate::character::Inventory;
use crate::prompt::Twist;

/// Deterministic scripted narrative used whenever the real generator is
/// unavailable. Keyed on topical markers in the situation text, crossed
/// with inventory sufficiency and the twist polarity. Produces the same
/// five-field structure the interpreter expects.
pub fn scripted_narrative(situation: &str, inventory: &Inventory, twist: Twist) -> String {
    let lower = situation.to_lowercase();

    let (decision, action, outcome, happiness_change, insight) = if lower.contains("skincare") {
        skincare_branch(inventory, twist)
    } else if lower.contains("hungry") || lower.contains("eat") {
        hunger_branch(inventory, twist)
    } else if lower.contains("call") || lower.contains("phone") || lower.contains("message") {
        communication_branch(inventory, twist)
    } else if lower.contains("work") || lower.contains("job") || lower.contains("computer") {
        work_branch(inventory, twist)
    } else {
        default_branch(twist)
    };

    format!(
        "DECISION: {}\nACTION: {}\nOUTCOME: {}\nHAPPINESS_CHANGE: {:+.1}\nINSIGHT: {}",
        decision, action, outcome, happiness_change, insight
    )
}

type Branch = (&'static str, &'static str, &'static str, f64, &'static str);

fn skincare_branch(inventory: &Inventory, twist: Twist) -> Branch {
    if inventory.skincare_kit {
        let decision = "I have my skincare kit, so I'll run through my routine";
        let action = "I wash my face, apply moisturizer from the kit, improvise with cooled tea when the toner runs out, and pat everything dry";
        match twist {
            Twist::Negative => (
                decision,
                action,
                "The power cut out halfway through and I stood around annoyed before I could finish",
                -0.2,
                "Even small rituals can be derailed by dumb luck",
            ),
            Twist::Positive => (
                decision,
                action,
                "I finish feeling refreshed, and a surprise text from Sarah lifts my mood further",
                0.8,
                "Simple self-care plus a friendly ping goes a long way",
            ),
        }
    } else {
        let decision = "No skincare kit in the cabinet, so I improvise something else";
        let action = "I check the cabinet, find only aloe vera gel, spread some on my face and rinse with cold water";
        match twist {
            Twist::Negative => (
                decision,
                action,
                "The aloe stung a small cut and now my face is a bit red and I'm irritated",
                -0.5,
                "Improvising helps, but not everything works out",
            ),
            Twist::Positive => (
                decision,
                action,
                "My skin feels a little better and I remembered an old lotion in my bag for later",
                0.3,
                "Making do with what I have still counts as self-care",
            ),
        }
    }
}

fn hunger_branch(inventory: &Inventory, twist: Twist) -> Branch {
    if inventory.food_items.iter().any(|item| item == "bread") {
        let decision = "I'm starving and there's bread in the kitchen, so I'll make a sandwich";
        let action = "I grab bread and cheese, find the toaster broken, warm the bread in a pan instead and melt the cheese on top";
        match twist {
            Twist::Negative => (
                decision,
                action,
                "The cheese welded itself to the pan and I singed a finger, but I ate it anyway",
                -0.1,
                "Even a simple meal can go sideways, but at least I ate",
            ),
            Twist::Positive => (
                decision,
                action,
                "The pan sandwich came out surprisingly good and I feel full and content",
                1.0,
                "Using what's on hand can lead to small wins",
            ),
        }
    } else {
        let decision = "I'm really hungry with no food at home, so I go find something cheap";
        let action = "I check my wallet, walk to the convenience store, pick up a cup of instant ramen and cook it back home";
        match twist {
            Twist::Negative => (
                decision,
                action,
                "The ramen packet was stale and tasted off, and now my stomach disagrees with me",
                -0.8,
                "Desperation meals often backfire",
            ),
            Twist::Positive => (
                decision,
                action,
                "The ramen actually hit the spot and I feel warm and less hungry",
                0.5,
                "Simple comfort food helps in tight moments",
            ),
        }
    }
}

fn communication_branch(inventory: &Inventory, twist: Twist) -> Branch {
    if inventory.phone_credit > 0 {
        let decision = "I want to reach Sarah and I still have phone credit";
        let action = "I dial her number, get no answer, and send a quick text checking in instead";
        match twist {
            Twist::Negative => (
                decision,
                action,
                "After sending it I notice I misspelled her name and feel embarrassed",
                -0.4,
                "Small mistakes can sour a good impulse",
            ),
            Twist::Positive => (
                decision,
                action,
                "She texts back something encouraging and I feel supported",
                0.7,
                "A friend's quick reply can lift the whole hour",
            ),
        }
    } else {
        let decision = "No phone credit left, so I need another way to reach people";
        let action = "I remember the cafe down the street has free wifi, grab my jacket and message Sarah from there";
        match twist {
            Twist::Negative => (
                decision,
                action,
                "The cafe wifi is down and I trudge home feeling annoyed and lonely",
                -0.7,
                "Plans can fail even when you prepare",
            ),
            Twist::Positive => (
                decision,
                action,
                "The message goes through and we chat for a while; I feel less alone",
                0.6,
                "A bit of effort can reconnect you to people",
            ),
        }
    }
}

fn work_branch(inventory: &Inventory, twist: Twist) -> Branch {
    if inventory.money >= 3 {
        let decision = "I should get some work done even though my energy is low";
        let action = "My laptop battery is nearly dead, so I take a few dollars to the cafe, buy a cheap coffee and charge at an outlet while drafting";
        match twist {
            Twist::Negative => (
                decision,
                action,
                "The cafe power flickered and the laptop died mid-sentence, which was maddening",
                -0.5,
                "Even careful effort can be thwarted by luck",
            ),
            Twist::Positive => (
                decision,
                action,
                "I finish the draft and feel productive and relieved",
                0.8,
                "A little push usually pays off",
            ),
        }
    } else {
        let decision = "I want to work but I'm broke, so I take a break instead";
        let action = "There's no outlet near the couch and no money for the cafe, so I stretch and take a short walk outside";
        match twist {
            Twist::Negative => (
                decision,
                action,
                "It started raining halfway through the walk and I came back soaked and grumpy",
                -0.6,
                "Sometimes breaks don't go as planned",
            ),
            Twist::Positive => (
                decision,
                action,
                "The walk woke me up a little and I'll revisit work after a nap",
                0.3,
                "Stepping away can refresh the mind",
            ),
        }
    }
}

fn default_branch(twist: Twist) -> Branch {
    let decision = "I take a short break to look after myself";
    let action = "I stand up and stretch, open a window for fresh air, drink a glass of water and breathe for a few minutes";
    match twist {
        Twist::Negative => (
            decision,
            action,
            "The neighbor cranked up loud music and the quiet moment evaporated",
            -0.3,
            "Outside noise can ruin a peaceful pause",
        ),
        Twist::Positive => (
            decision,
            action,
            "I feel calmer and more centered after the pause",
            0.7,
            "Small pauses can noticeably lift my mood",
        ),
    }
}
