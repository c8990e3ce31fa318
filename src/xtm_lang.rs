// Localized UI strings: English and Spanish

#[derive(Clone)]
pub struct Assets {
    // Main menu
    pub title: &'static str,
    pub menu_play: &'static str,
    pub menu_difficulty: &'static str,
    pub menu_scores: &'static str,
    pub menu_exit: &'static str,
    pub menu_hint: &'static str,

    // Difficulty names, indexed like the presets
    pub diff_names: [&'static str; 3],

    // Game screen
    pub level_label: &'static str,
    pub info_time: &'static str,
    pub info_flags: &'static str,
    pub info_mines: &'static str,
    pub btn_restart: &'static str,
    pub btn_back: &'static str,
    pub game_hint: &'static str,

    // Name prompt
    pub win_message: &'static str,
    pub loss_message: &'static str,
    pub prompt_name: &'static str,
    pub prompt_score: &'static str,
    pub prompt_hint: &'static str,

    // Score table
    pub scores_title: &'static str,
    pub scores_empty: &'static str,
    pub scores_points: &'static str,

    // Terminal size
    pub tsmsg_title: &'static str,
    pub tsmsg_line1: &'static str,
    pub tsmsg_line2: &'static str, // followed by "W x H"
}

/// Returns English language assets
pub fn english_assets() -> Assets {
    Assets {
        title: "MINESWEEPER",
        menu_play: "Play",
        menu_difficulty: "Difficulty",
        menu_scores: "Scores",
        menu_exit: "Exit",
        menu_hint: "Arrows/Mouse: select   Enter/Click: choose   Esc: exit",

        diff_names: ["Easy", "Medium", "Hard"],

        level_label: "Level",
        info_time: "Time",
        info_flags: "Flags",
        info_mines: "Mines",
        btn_restart: "Restart",
        btn_back: "Back",
        game_hint: "Space/Click: open  F/R-Click: flag  R: restart  Esc: back",

        win_message: "YOU WIN - Enter your name:",
        loss_message: "YOU LOSE - Enter your name:",
        prompt_name: "Name",
        prompt_score: "Score",
        prompt_hint: "Enter: save   Esc: skip",

        scores_title: "Top 10 Scores",
        scores_empty: "No scores yet",
        scores_points: "Pts",

        tsmsg_title: "Resize needed",
        tsmsg_line1: "Terminal layout too small",
        tsmsg_line2: "Minimum size required:",
    }
}

/// Returns Spanish language assets
pub fn spanish_assets() -> Assets {
    Assets {
        title: "BUSCAMINAS",
        menu_play: "Jugar",
        menu_difficulty: "Dificultad",
        menu_scores: "Puntajes",
        menu_exit: "Salir",
        menu_hint: "Flechas/Mouse: elegir   Enter/Click: aceptar   Esc: salir",

        diff_names: ["Facil", "Medio", "Dificil"],

        level_label: "Nivel",
        info_time: "Tiempo",
        info_flags: "Banderas",
        info_mines: "Minas",
        btn_restart: "Reiniciar",
        btn_back: "Volver",
        game_hint: "Espacio: abrir  F/Der.: bandera  R: reiniciar  Esc: volver",

        win_message: "GANASTE - Ingresa tu nombre:",
        loss_message: "PERDISTE - Ingresa tu nombre:",
        prompt_name: "Nombre",
        prompt_score: "Puntaje",
        prompt_hint: "Enter: guardar   Esc: omitir",

        scores_title: "Top 10 Puntajes",
        scores_empty: "No hay puntajes",
        scores_points: "Pts",

        tsmsg_title: "Ajustar tamano",
        tsmsg_line1: "Terminal demasiado pequena",
        tsmsg_line2: "Tamano minimo:",
    }
}

/// Holds the current language code and active string assets
pub struct Lang {
    pub current_lang: String,
    pub assets: Assets,
}

impl Lang {
    /// Normalizes the code ("es-AR" -> "es"); anything unsupported is English
    pub fn new(lang_code: &str) -> Self {
        let code = if lang_code.to_lowercase().starts_with("es") { "es" } else { "en" };
        Lang {
            current_lang: code.to_string(),
            assets: if code == "es" { spanish_assets() } else { english_assets() },
        }
    }

    pub fn diff_name(&self, index: usize) -> &'static str {
        self.assets.diff_names[index.min(2)]
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_codes_normalize() {
        assert_eq!(Lang::new("es-AR").current_lang, "es");
        assert_eq!(Lang::new("ES").assets.menu_play, "Jugar");
        assert_eq!(Lang::new("fr").current_lang, "en");
    }

    #[test]
    fn difficulty_names_alias_past_hard() {
        let lang = Lang::new("en");
        assert_eq!(lang.diff_name(0), "Easy");
        assert_eq!(lang.diff_name(9), "Hard");
    }
}
