//! Static content tables keyed by [`Religion`].
//!
//! Every function here is total over the enum: lookups cannot miss. Lists
//! (prayer times, events) default to an empty slice for religions without
//! entries; everything else always has a value.

use crate::models::Religion;

pub fn quote(religion: Religion) -> &'static str {
    match religion {
        Religion::Christianity => {
            "Faith is taking the first step even when you don't see the whole staircase."
        }
        Religion::Islam => "The best among you are those who have the best manners and character.",
        Religion::Hinduism => "Where there is Dharma, there is victory.",
        Religion::Buddhism => "Peace comes from within. Do not seek it without.",
        Religion::Judaism => {
            "Whoever saves one life, it is as if they have saved the entire world."
        }
        Religion::Sikhism => "Live without regret, love without limits.",
        Religion::Jainism => "A man is great by deeds, not by birth.",
        Religion::Bahai => "Be generous in prosperity, and thankful in adversity.",
        Religion::Shinto => "Harmony with nature brings peace.",
        Religion::Taoism => "Nature does not hurry, yet everything is accomplished.",
    }
}

pub fn meditation_guide(religion: Religion) -> &'static str {
    match religion {
        Religion::Christianity => "Focus on the presence of God and reflect on His blessings.",
        Religion::Islam => "Concentrate on the remembrance of Allah and your daily prayers.",
        Religion::Hinduism => "Engage in deep breathing and focus on the divine within.",
        Religion::Buddhism => "Practice mindfulness and observe your thoughts without judgment.",
        Religion::Judaism => "Reflect on your daily deeds and seek inner peace through prayer.",
        Religion::Sikhism => "Meditate on the divine name and cultivate inner harmony.",
        Religion::Jainism => "Practice deep breathing and focus on non-violence and truth.",
        Religion::Bahai => "Contemplate the unity of humanity and the presence of God.",
        Religion::Shinto => "Connect with nature and honor the spirits around you.",
        Religion::Taoism => "Embrace the flow of the Tao and maintain inner balance.",
    }
}

/// Daily prayer times. Only Islam has fixed times; everyone else gets an
/// empty slice.
pub fn prayer_times(religion: Religion) -> &'static [&'static str] {
    match religion {
        Religion::Islam => &[
            "Fajr: 5:00 AM",
            "Dhuhr: 12:30 PM",
            "Asr: 3:45 PM",
            "Maghrib: 6:15 PM",
            "Isha: 7:30 PM",
        ],
        _ => &[],
    }
}

/// Upcoming observances. Empty slice for religions without curated entries.
pub fn upcoming_events(religion: Religion) -> &'static [&'static str] {
    match religion {
        Religion::Christianity => &[
            "Easter - April 9, 2024",
            "Christmas - December 25, 2024",
        ],
        Religion::Islam => &[
            "Ramadan - Starts March 10, 2024",
            "Eid al-Fitr - April 9, 2024",
        ],
        Religion::Hinduism => &["Diwali - November 1, 2024", "Holi - March 25, 2024"],
        Religion::Buddhism => &["Vesak - May 23, 2024"],
        Religion::Judaism => &[
            "Yom Kippur - October 11, 2024",
            "Hanukkah - December 25, 2024",
        ],
        _ => &[],
    }
}

pub fn donation_link(religion: Religion) -> &'static str {
    match religion {
        Religion::Christianity => "https://www.christiancharities.org/donate",
        Religion::Islam => "https://www.islamiccharities.org/donate",
        Religion::Hinduism => "https://www.hinducharities.org/donate",
        Religion::Buddhism => "https://www.buddhistcharities.org/donate",
        Religion::Judaism => "https://www.jewishcharities.org/donate",
        Religion::Sikhism => "https://www.sikhcharities.org/donate",
        Religion::Jainism => "https://www.jaincharities.org/donate",
        Religion::Bahai => "https://www.bahaicharities.org/donate",
        Religion::Shinto => "https://www.shintocharities.org/donate",
        Religion::Taoism => "https://www.taocharities.org/donate",
    }
}

pub fn forum_link(religion: Religion) -> &'static str {
    match religion {
        Religion::Christianity => "https://www.reddit.com/r/Christianity/",
        Religion::Islam => "https://www.reddit.com/r/islam/",
        Religion::Hinduism => "https://www.reddit.com/r/hinduism/",
        Religion::Buddhism => "https://www.reddit.com/r/Buddhism/",
        Religion::Judaism => "https://www.reddit.com/r/Judaism/",
        Religion::Sikhism => "https://www.reddit.com/r/sikh/",
        Religion::Jainism => "https://www.reddit.com/r/Jainism/",
        Religion::Bahai => "https://www.reddit.com/r/Bahai/",
        Religion::Shinto => "https://www.reddit.com/r/shinto/",
        Religion::Taoism => "https://www.reddit.com/r/taoism/",
    }
}

pub fn video_url(religion: Religion) -> &'static str {
    match religion {
        Religion::Christianity => "https://www.youtube.com/embed/1i3Z3vZJh0Y",
        Religion::Islam => "https://www.youtube.com/embed/islam-inspiration",
        Religion::Hinduism => "https://www.youtube.com/embed/hinduism-inspiration",
        Religion::Buddhism => "https://www.youtube.com/embed/buddhism-inspiration",
        Religion::Judaism => "https://www.youtube.com/embed/judaism-inspiration",
        Religion::Sikhism => "https://www.youtube.com/embed/sikhism-inspiration",
        Religion::Jainism => "https://www.youtube.com/embed/jainism-inspiration",
        Religion::Bahai => "https://www.youtube.com/embed/bahai-inspiration",
        Religion::Shinto => "https://www.youtube.com/embed/shinto-inspiration",
        Religion::Taoism => "https://www.youtube.com/embed/taoism-inspiration",
    }
}

pub const DEFAULT_VERSE: &str = "Stay blessed and have a peaceful day.";

/// Scripture used when the live verse fetch fails or has no feed for the
/// religion. Christianity uses the generic default because its verse is
/// normally fetched live.
pub fn fallback_verse(religion: Religion) -> &'static str {
    match religion {
        Religion::Christianity => DEFAULT_VERSE,
        Religion::Islam => "Quran 2:255 - Allah! There is no deity except Him...",
        Religion::Hinduism => {
            "Bhagavad Gita 2:47 - You have the right to perform your prescribed duties..."
        }
        Religion::Buddhism => "Dhammapada 1: Mind precedes all...",
        Religion::Judaism => "Psalm 23: The Lord is my shepherd...",
        Religion::Sikhism => "Japji Sahib - Meditation on God's name...",
        Religion::Jainism => "Acharanga Sutra - Non-violence is the highest duty...",
        Religion::Bahai => "The Hidden Words - By Him that loveth best...",
        Religion::Shinto => "Kojiki - Kami are revered...",
        Religion::Taoism => "Tao Te Ching 1 - The Tao that can be told...",
    }
}

pub fn fallback_music_url(religion: Religion) -> &'static str {
    match religion {
        Religion::Christianity => "https://example.com/christian_music.mp3",
        Religion::Islam => "https://example.com/islam_music.mp3",
        Religion::Hinduism => "https://example.com/hindu_music.mp3",
        Religion::Buddhism => "https://example.com/buddhism_music.mp3",
        Religion::Judaism => "https://example.com/judaism_music.mp3",
        Religion::Sikhism => "https://example.com/sikhism_music.mp3",
        Religion::Jainism => "https://example.com/jainism_music.mp3",
        Religion::Bahai => "https://example.com/bahai_music.mp3",
        Religion::Shinto => "https://example.com/shinto_music.mp3",
        Religion::Taoism => "https://example.com/taoism_music.mp3",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_lookups_are_nonempty_for_all_religions() {
        for religion in Religion::ALL {
            assert!(!quote(religion).is_empty());
            assert!(!meditation_guide(religion).is_empty());
            assert!(!donation_link(religion).is_empty());
            assert!(!forum_link(religion).is_empty());
            assert!(!video_url(religion).is_empty());
            assert!(!fallback_verse(religion).is_empty());
            assert!(!fallback_music_url(religion).is_empty());
        }
    }

    #[test]
    fn test_prayer_times_only_for_islam() {
        for religion in Religion::ALL {
            if religion == Religion::Islam {
                assert_eq!(prayer_times(religion).len(), 5);
            } else {
                assert!(prayer_times(religion).is_empty());
            }
        }
    }

    #[test]
    fn test_events_populated_for_major_calendars() {
        assert!(!upcoming_events(Religion::Christianity).is_empty());
        assert!(!upcoming_events(Religion::Islam).is_empty());
        assert!(upcoming_events(Religion::Shinto).is_empty());
    }

    #[test]
    fn test_donation_links_look_like_urls() {
        for religion in Religion::ALL {
            assert!(donation_link(religion).starts_with("https://"));
        }
    }
}
