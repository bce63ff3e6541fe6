// pwnmlrs/src/formatting.rs

//! Output of namelist groups and cards in the deck's text syntax.

use crate::value::{FormatOptions, FortranValue};

/// Options for controlling deck output formatting.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Overwrite an existing output file
    pub force: bool,
    /// Indentation string for variables inside a group
    pub indent: String,
    /// Whether to add a comma after every assignment
    pub end_comma: bool,
    /// Whether to write group and card names in uppercase
    pub uppercase: bool,
    /// Float formatting precision
    pub float_precision: Option<usize>,
    /// Write exponents with `d` instead of `e`
    pub use_fortran_double: bool,
    /// Whether to sort variables within groups alphabetically
    pub sort_variables: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            force: true,
            indent: "    ".to_string(),
            end_comma: false,
            uppercase: true,
            float_precision: None,
            use_fortran_double: false,
            sort_variables: false,
        }
    }
}

impl WriteOptions {
    fn value_options(&self) -> FormatOptions {
        FormatOptions {
            uppercase: false,
            float_precision: self.float_precision,
            use_fortran_double: self.use_fortran_double,
        }
    }

    fn section_name(&self, name: &str) -> String {
        if self.uppercase {
            name.to_uppercase()
        } else {
            name.to_lowercase()
        }
    }
}

/// Accumulates groups and cards and renders them as one deck: all groups
/// first, then all cards, each in insertion order.
pub struct DeckWriter<'o> {
    options: &'o WriteOptions,
    namelists: String,
    cards: String,
}

impl<'o> DeckWriter<'o> {
    pub fn new(options: &'o WriteOptions) -> Self {
        Self {
            options,
            namelists: String::new(),
            cards: String::new(),
        }
    }

    /// Append a namelist group.
    pub fn namelist<'a, I>(&mut self, name: &str, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a str, &'a FortranValue)>,
    {
        let mut entries: Vec<_> = entries.into_iter().collect();
        if self.options.sort_variables {
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        }

        let value_options = self.options.value_options();
        self.namelists
            .push_str(&format!("&{}\n", self.options.section_name(name)));
        for (key, value) in entries {
            self.namelists.push_str(&format!(
                "{}{} = {}{}\n",
                self.options.indent,
                key,
                value.to_fortran_string_with_options(&value_options),
                if self.options.end_comma { "," } else { "" }
            ));
        }
        self.namelists.push_str("/\n");
        self
    }

    /// Append a card. The body is written line by line, trailing whitespace removed.
    pub fn card(&mut self, name: &str, subtitle: Option<&str>, body: Option<&str>) -> &mut Self {
        self.cards.push_str(&self.options.section_name(name));
        if let Some(subtitle) = subtitle.filter(|s| !s.trim().is_empty()) {
            self.cards.push(' ');
            self.cards.push_str(subtitle.trim());
        }
        self.cards.push('\n');
        if let Some(body) = body {
            for line in body.lines().filter(|l| !l.trim().is_empty()) {
                self.cards.push_str(line.trim_end());
                self.cards.push('\n');
            }
        }
        self
    }

    /// Render everything appended so far.
    pub fn finish(self) -> String {
        let mut output = self.namelists;
        if !output.is_empty() && !self.cards.is_empty() {
            output.push('\n');
        }
        output.push_str(&self.cards);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namelist_output() {
        let options = WriteOptions::default();
        let calculation = FortranValue::character("scf");
        let ecut = FortranValue::Real(30.0);
        let mut writer = DeckWriter::new(&options);
        writer.namelist("control", [("calculation", &calculation), ("ecutwfc", &ecut)]);
        assert_eq!(
            writer.finish(),
            "&CONTROL\n    calculation = 'scf'\n    ecutwfc = 30.0\n/\n"
        );
    }

    #[test]
    fn test_card_output() {
        let options = WriteOptions::default();
        let mut writer = DeckWriter::new(&options);
        writer
            .card("k_points", Some("automatic"), Some("4 4 4 0 0 0\n\n"))
            .card("k_points_empty", None, None);
        assert_eq!(
            writer.finish(),
            "K_POINTS automatic\n4 4 4 0 0 0\nK_POINTS_EMPTY\n"
        );
    }

    #[test]
    fn test_groups_precede_cards() {
        let options = WriteOptions {
            uppercase: false,
            end_comma: true,
            sort_variables: true,
            ..Default::default()
        };
        let nat = FortranValue::Integer(2);
        let ibrav = FortranValue::Integer(0);
        let mut writer = DeckWriter::new(&options);
        writer.card("atomic_species", None, Some("Si 28.085 Si.UPF"));
        writer.namelist("SYSTEM", [("nat", &nat), ("ibrav", &ibrav)]);
        assert_eq!(
            writer.finish(),
            "&system\n    ibrav = 0,\n    nat = 2,\n/\n\natomic_species\nSi 28.085 Si.UPF\n"
        );
    }
}
