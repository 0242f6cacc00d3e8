use std::fmt;
use std::str::FromStr;

/// Pantheons the knowledge-base queries know how to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mythology {
    Greek,
    Norse,
    Egyptian,
    Hindu,
    Celtic,
}

impl Mythology {
    pub const ALL: [Mythology; 5] = [
        Mythology::Greek,
        Mythology::Norse,
        Mythology::Egyptian,
        Mythology::Hindu,
        Mythology::Celtic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mythology::Greek => "Greek",
            Mythology::Norse => "Norse",
            Mythology::Egyptian => "Egyptian",
            Mythology::Hindu => "Hindu",
            Mythology::Celtic => "Celtic",
        }
    }

    /// Wikidata item for "deity of this mythology" (the `instance of` target).
    pub fn wikidata_item(self) -> &'static str {
        match self {
            Mythology::Greek => "Q22989102",
            Mythology::Norse => "Q16513881",
            Mythology::Egyptian => "Q146083",
            Mythology::Hindu => "Q979507",
            Mythology::Celtic => "Q465434",
        }
    }

    /// First id handed out when a batch of this mythology is converted, so batches can be merged
    /// without id clashes.
    pub fn start_id(self) -> u32 {
        match self {
            Mythology::Greek => 1,
            Mythology::Norse => 100,
            Mythology::Egyptian => 200,
            Mythology::Hindu => 300,
            Mythology::Celtic => 400,
        }
    }

    /// Accepts a bare item id (`Q146083`), a prefixed one (`wd:Q146083`) or a full entity URI.
    pub fn from_instance(instance: &str) -> Option<Self> {
        let instance = instance.trim();
        let item = instance
            .strip_prefix("http://www.wikidata.org/entity/")
            .or_else(|| instance.strip_prefix("wd:"))
            .unwrap_or(instance);
        Self::ALL.into_iter().find(|m| m.wikidata_item() == item)
    }
}

impl fmt::Display for Mythology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mythology {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .or_else(|| Self::from_instance(s))
            .ok_or(())
    }
}
