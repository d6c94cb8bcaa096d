//! Catalog of motivational phrases and a uniform picker over it.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

/// The fixed phrase catalog shown in the app and in reminder notifications.
pub const MOTIVATION_PHRASES: [&str; 20] = [
    "C'est l'heure de créer ! Ton futur client attend ton contenu. 💪",
    "Chaque création te rapproche de ton objectif freelance ! 🚀",
    "Les meilleurs freelances créent quotidiennement. À toi de jouer ! ⭐",
    "Ton portfolio s'enrichit à chaque publication. Go ! 🎯",
    "La régularité est la clé du succès freelance. Crée maintenant ! 🔑",
    "Transforme cette inspiration en contenu. Tu en es capable ! 💡",
    "Tes futurs clients cherchent ton expertise. Montre-la ! 📱",
    "Un petit pas aujourd'hui = un grand bond demain. Commence ! 🏃",
    "Le contenu que tu crées aujourd'hui travaillera pour toi demain ! 💼",
    "Ta créativité est unique. Partage-la avec le monde ! 🌟",
    "Les opportunités freelance viennent à ceux qui créent ! 🎨",
    "Aujourd'hui est parfait pour créer quelque chose d'incroyable ! ✨",
    "Ta consistency = ta crédibilité. Continue comme ça ! 📈",
    "Chaque contenu est une vitrine de ton talent. Brille ! 💎",
    "Le momentum se construit jour après jour. Ne casse pas la chaîne ! ⚡",
    "Ton audience grandit avec chaque création. Persévère ! 📊",
    "Les meilleurs portfolios se construisent une création à la fois ! 🏗️",
    "Ta discipline d'aujourd'hui = ton succès de demain ! 🏆",
    "Crée maintenant, ton futur toi te remerciera ! 🙏",
    "L'algorithme aime la régularité. Donne-lui ce qu'il veut ! 📲",
];

/// Uniform random selection from [`MOTIVATION_PHRASES`].
#[derive(Debug, Clone)]
pub struct PhrasePicker {
    rng: Mcg128Xsl64,
}

impl PhrasePicker {
    /// Picker seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    /// Deterministic picker, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }

    /// A picker with its own independent stream, drawn from this one.
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.rng.next_u64())
    }

    pub fn pick(&mut self) -> &'static str {
        MOTIVATION_PHRASES[self.rng.gen_range(0..MOTIVATION_PHRASES.len())]
    }
}

impl Default for PhrasePicker {
    fn default() -> Self {
        Self::new()
    }
}
