//! Built-in content used whenever a content file cannot be loaded.

use crate::content::{AboutContent, Episode, FaqContent, FaqItem};

/// The two launch episodes.
pub fn default_episodes() -> Vec<Episode> {
    vec![
        Episode {
            id: "ep001".to_string(),
            number: 1,
            title: "Welcome to Our Podcast".to_string(),
            description: "In our inaugural episode, we introduce ourselves and share what you can expect from this podcast.".to_string(),
            duration: "25:30".to_string(),
            publish_date: "2025-01-01".to_string(),
            artwork_url: "/assets/images/ep001.svg".to_string(),
            artwork_alt: Some("Episode 1 artwork".to_string()),
            audio_url: "/assets/audio/mock.mp3".to_string(),
            tags: vec!["introduction".to_string(), "welcome".to_string()],
        },
        Episode {
            id: "ep002".to_string(),
            number: 2,
            title: "Getting Started".to_string(),
            description: "We dive into the basics and share some fundamental concepts.".to_string(),
            duration: "32:15".to_string(),
            publish_date: "2025-01-08".to_string(),
            artwork_url: "/assets/images/ep002.svg".to_string(),
            artwork_alt: Some("Episode 2 artwork".to_string()),
            audio_url: "/assets/audio/mock.mp3".to_string(),
            tags: vec!["basics".to_string(), "fundamentals".to_string()],
        },
    ]
}

pub fn default_about() -> AboutContent {
    AboutContent {
        title: "About Our Podcast".to_string(),
        description: "Welcome to our podcast, a space where we explore the art, science, and business of audio storytelling.".to_string(),
        mission: "We're dedicated to demystifying the podcasting world and providing actionable insights for creators at every stage of their journey. Whether you're just starting out or looking to scale your existing show, we've got you covered.".to_string(),
        who_we_are: "Our team brings together years of experience in audio production, content creation, and digital media. We're passionate about the power of voice and the unique intimacy that podcasting offers.".to_string(),
        what_we_cover: [
            "Production techniques and sound design secrets",
            "Audience growth strategies that actually work",
            "Monetization approaches for sustainable podcasting",
            "Industry insights from leading voices in audio",
            "Technical know-how without the jargon",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        join_community: "We believe podcasting is better together. Join thousands of creators who tune in each week to level up their craft. Subscribe on your favorite platform and never miss an episode.".to_string(),
    }
}

pub fn default_faq() -> FaqContent {
    let items = [
        (
            "How often do you release new episodes?",
            "We release a new episode every week, typically on Sundays. Occasionally, we'll drop bonus episodes or special interviews between our regular schedule.",
        ),
        (
            "Where can I listen to the podcast?",
            "Our podcast is available on all major platforms including Apple Podcasts, Spotify, Google Podcasts, and directly on this website. Choose whichever platform works best for you!",
        ),
        (
            "Can I suggest a topic or guest?",
            "Absolutely! We love hearing from our listeners. Send us your topic ideas or guest suggestions through our contact form or social media channels. We read every message.",
        ),
        (
            "Do you have transcripts available?",
            "Yes, we provide full transcripts for accessibility. You can find them on each episode's page, usually within 48 hours of release.",
        ),
        (
            "How can I support the podcast?",
            "The best way to support us is to subscribe, rate, and review on your podcast platform of choice. Sharing episodes with friends who might enjoy them also helps us grow. We also have sponsorship and partnership opportunities available.",
        ),
        (
            "Do you take advertising or sponsorships?",
            "We do work with select sponsors whose products and services align with our audience's interests. All sponsorships are clearly disclosed, and we only partner with brands we believe in.",
        ),
        (
            "Can I use clips from your podcast?",
            "Short clips for educational or commentary purposes under fair use are fine. For commercial use or longer excerpts, please contact us for permission. Always provide attribution.",
        ),
        (
            "How do I contact the hosts?",
            "You can reach us through our contact form, email (listed in episode show notes), or on social media. We try to respond to all messages within a few business days.",
        ),
    ];

    FaqContent {
        items: items
            .into_iter()
            .map(|(question, answer)| FaqItem {
                question: question.to_string(),
                answer: answer.to_string(),
            })
            .collect(),
    }
}
