//! Taxonomy concept identifiers used in K2 reports.
//!
//! Names are grouped by the namespace they live in. Each constant is the
//! fully qualified name as it appears in a `name` attribute.

macro_rules! concepts {
    ($prefix:literal; $($(#[$doc:meta])* $name:ident = $local:literal;)*) => {
        pub const PREFIX: &str = $prefix;
        $(
            $(#[$doc])*
            pub const $name: &str = concat!($prefix, ":", $local);
        )*
    };
}

/// `se-gen-base`: the general K2 concepts.
pub mod gen_base {
    concepts! { "se-gen-base";
        INTRO_SENTENCE = "LopandeBokforingenAvslutasMening";
        BUSINESS_DESCRIPTION = "AllmantVerksamheten";
        SIGNIFICANT_EVENTS = "VasentligaHandelserRakenskapsaret";
        OVERVIEW_COMMENT = "KommentarFlerarsoversikt";
        BOARD_DIVIDEND_STATEMENT = "StyrelsensYttrandeVinstutdelning";
        /// Equity over total assets, tagged in percent at scale -2.
        SOLIDITY = "Soliditet";

        EQUITY_CHANGE_TOTAL = "ForandringEgetKapitalTotalt";
        EQUITY_CHANGE_NET_INCOME_DIVIDEND = "ForandringEgetKapitalAretsResultatUtdelning";
        EQUITY_CHANGE_TOTAL_DIVIDEND = "ForandringEgetKapitalTotaltUtdelning";
        EQUITY_CHANGE_NET_INCOME_YEAR_RESULT = "ForandringEgetKapitalAretsResultatAretsResultat";
        EQUITY_CHANGE_TOTAL_YEAR_RESULT = "ForandringEgetKapitalTotaltAretsResultat";

        FUNDS_AVAILABLE = "MedelDisponera";
        PROPOSED_DIVIDEND = "ForslagDispositionUtdelning";
        PROPOSED_CARRIED_FORWARD = "ForslagDispositionBalanserasINyRakning";
        PROPOSED_DISPOSITION = "ForslagDisposition";

        NET_SALES = "Nettoomsattning";
        INVENTORY_CHANGE = "ForandringLagerProdukterIArbeteFardigaVarorPagaendeArbetenAnnansRakning";
        OTHER_OPERATING_INCOME = "OvrigaRorelseintakter";
        OPERATING_INCOME_TOTAL = "RorelseintakterLagerforandringarMm";
        RAW_MATERIALS_EXPENSES = "RavarorFornodenheterKostnader";
        TRADING_GOODS_EXPENSES = "HandelsvarorKostnader";
        OTHER_EXTERNAL_EXPENSES = "OvrigaExternaKostnader";
        PERSONNEL_EXPENSES = "Personalkostnader";
        DEPRECIATION_AMORTIZATION = "AvskrivningarNedskrivningarMateriellaImmateriellaAnlaggningstillgangar";
        OTHER_OPERATING_EXPENSES = "OvrigaRorelsekostnader";
        OPERATING_EXPENSES_TOTAL = "Rorelsekostnader";
        OPERATING_RESULT = "Rorelseresultat";
        RESULT_OTHER_FINANCIAL_ASSETS = "ResultatOvrigaFinansiellaAnlaggningstillgangar";
        OTHER_INTEREST_INCOME = "OvrigaRanteintakterLiknandeResultatposter";
        INTEREST_EXPENSES = "RantekostnaderLiknandeResultatposter";
        FINANCIAL_ITEMS_TOTAL = "FinansiellaPoster";
        RESULT_AFTER_FINANCIAL_ITEMS = "ResultatEfterFinansiellaPoster";
        TAX_ALLOCATION_RESERVE_CHANGE = "ForandringPeriodiseringsfond";
        EXCESS_DEPRECIATION_CHANGE = "ForandringOveravskrivningar";
        APPROPRIATIONS_TOTAL = "Bokslutsdispositioner";
        RESULT_BEFORE_TAX = "ResultatForeSkatt";
        INCOME_TAX = "SkattAretsResultat";
        NET_RESULT = "AretsResultat";

        BUILDINGS_AND_LAND = "ByggnaderMark";
        MACHINERY_AND_EQUIPMENT = "MaskinerAndraTekniskaAnlaggningar";
        FIXTURES_AND_FITTINGS = "InventarierVerktygInstallationer";
        TANGIBLE_FIXED_ASSETS = "MateriellaAnlaggningstillgangar";
        OTHER_LONG_TERM_SECURITIES = "AndraLangfristigaVardepappersinnehav";
        FINANCIAL_FIXED_ASSETS = "FinansiellaAnlaggningstillgangar";
        FIXED_ASSETS = "Anlaggningstillgangar";
        RAW_MATERIALS_INVENTORY = "LagerRavarorFornodenheter";
        WORK_IN_PROGRESS = "LagerVarorUnderTillverkning";
        FINISHED_GOODS = "LagerFardigaVarorHandelsvaror";
        INVENTORY_TOTAL = "VarulagerMm";
        TRADE_RECEIVABLES = "Kundfordringar";
        OTHER_RECEIVABLES = "OvrigaFordringarKortfristiga";
        PREPAID_EXPENSES = "ForutbetaldaKostnaderUpplupnaIntakter";
        SHORT_TERM_RECEIVABLES = "KortfristigaFordringar";
        CASH_AND_BANK_EXCL = "KassaBankExklRedovisningsmedel";
        CASH_AND_BANK = "KassaBank";
        CURRENT_ASSETS = "Omsattningstillgangar";
        TOTAL_ASSETS = "Tillgangar";

        SHARE_CAPITAL = "Aktiekapital";
        RESERVE_FUND = "Reservfond";
        RESTRICTED_EQUITY = "BundetEgetKapital";
        RETAINED_EARNINGS = "BalanseratResultat";
        NET_INCOME_EQUITY = "AretsResultatEgetKapital";
        UNRESTRICTED_EQUITY = "FrittEgetKapital";
        EQUITY = "EgetKapital";
        TAX_ALLOCATION_RESERVES = "Periodiseringsfonder";
        ACCUMULATED_EXCESS_DEPRECIATION = "AckumuleradeOveravskrivningar";
        UNTAXED_RESERVES = "ObeskattadeReserver";
        PENSION_PROVISIONS = "AvsattningarPensionerLiknandeForpliktelserEnligtLag";
        OTHER_PROVISIONS = "OvrigaAvsattningar";
        PROVISIONS = "Avsattningar";
        BANK_LOANS = "OvrigaLangfristigaSkulderKreditinstitut";
        OTHER_LONG_TERM_LIABILITIES = "OvrigaLangfristigaSkulder";
        LONG_TERM_LIABILITIES = "LangfristigaSkulder";
        TRADE_PAYABLES = "Leverantorsskulder";
        TAX_LIABILITIES = "Skatteskulder";
        OTHER_SHORT_TERM_LIABILITIES = "OvrigaKortfristigaSkulder";
        ACCRUED_EXPENSES = "UpplupnaKostnaderForutbetaldaIntakter";
        SHORT_TERM_LIABILITIES = "KortfristigaSkulder";
        EQUITY_AND_LIABILITIES = "EgetKapitalSkulder";

        ACCOUNTING_POLICIES = "Redovisningsprinciper";
        DEPRECIATION_YEARS_BUILDINGS = "AvskrivningarMateriellaAnlaggningstillgangarByggnaderAr";
        DEPRECIATION_YEARS_MACHINERY = "AvskrivningarMateriellaAnlaggningstillgangarMaskinerAndraTekniskaAnlaggningarAr";
        DEPRECIATION_YEARS_FIXTURES = "AvskrivningarMateriellaAnlaggningstillgangarInventarierVerktygInstallationerAr";
        DEPRECIATION_COMMENT = "AvskrivningarMateriellaAnlaggningstillgangarKommentar";
        MANUFACTURED_GOODS_POLICY = "RedovisningsprinciperAnskaffningsvardeEgentillverkadevaror";
        AVERAGE_EMPLOYEES = "MedelantaletAnstallda";
        DUE_AFTER_FIVE_YEARS = "LangfristigaSkulderForfallerSenare5Ar";
        CORPORATE_MORTGAGES = "StalldaSakerheterForetagsinteckningar";
        REAL_ESTATE_MORTGAGES = "StalldaSakerheterFastighetsinteckningar";
        PLEDGES = "StalldaSakerheter";
        CONTINGENT_LIABILITIES = "EventualForpliktelser";

        MULTI_POST_NOTE = "NotTillgangarAvsattningarSkulderAvserFleraPoster";
        MULTI_POST_TUPLE = "TillgangarAvsattningarSkulderTuple";
        MULTI_POST_NAME = "TillgangarAvsattningarSkulderPost";
        MULTI_POST_AMOUNT = "TillgangarAvsattningarSkulderBelopp";

        SIGNING_CITY = "UndertecknandeArsredovisningOrt";
        SIGNING_DATE = "UndertecknandeArsredovisningDatum";
        SIGNATORY_TUPLE = "UnderskriftArsredovisningForetradareTuple";
        SIGNATORY_FIRST_NAME = "UnderskriftArsredovisningForetradareTilltalsnamn";
        SIGNATORY_LAST_NAME = "UnderskriftArsredovisningForetradareEfternamn";
        SIGNATORY_ROLE = "UnderskriftArsredovisningForetradareForetradarroll";
    }

    /// Suffixes of the roll-forward concepts built from a fixed-asset stem
    /// such as `ByggnaderMark`. The bare stem is the carrying value.
    pub mod roll_forward {
        pub const ACQUISITION_VALUES: &str = "Anskaffningsvarden";
        pub const PURCHASES: &str = "ForandringAnskaffningsvardenInkop";
        pub const SALES: &str = "ForandringAnskaffningsvardenForsaljningar";
        pub const DEPRECIATION: &str = "Avskrivningar";
        pub const YEAR_DEPRECIATION: &str = "ForandringAvskrivningarAretsAvskrivningar";
    }

    pub fn qualified(stem: &str, suffix: &str) -> String {
        format!("{}:{}{}", PREFIX, stem, suffix)
    }
}

/// `se-cd-base`: company and document metadata.
pub mod cd_base {
    concepts! { "se-cd-base";
        COMPANY_NAME = "ForetagetsNamn";
        ORG_NR = "Organisationsnummer";
        LANGUAGE = "Sprak";
        COUNTRY = "Land";
        CURRENCY = "Redovisningsvaluta";
        AMOUNT_FORMAT = "Beloppsformat";
        FISCAL_YEAR_FIRST_DAY = "RakenskapsarForstaDag";
        FISCAL_YEAR_LAST_DAY = "RakenskapsarSistaDag";
    }
}

/// `se-bol-base`: the certification of adoption (fastställelseintyg).
pub mod bol_base {
    concepts! { "se-bol-base";
        /// Wraps the other certification facts and continues elsewhere.
        CERTIFICATION = "ArsstammaIntygande";
        CONFIRMATION = "FaststallelseResultatBalansrakning";
        MEETING_DATE = "Arsstamma";
        DISPOSITION_DECISION = "ArsstammaResultatDispositionGodkannaStyrelsensForslag";
        ORIGINAL_CONTENT = "IntygandeOriginalInnehall";
        ELECTRONIC_SIGNATURE = "UnderskriftFaststallelseintygElektroniskt";
        SIGNATORY_FIRST_NAME = "UnderskriftFaststallelseintygForetradareTilltalsnamn";
        SIGNATORY_LAST_NAME = "UnderskriftFaststallelseintygForetradareEfternamn";
        SIGNATORY_ROLE = "UnderskriftFaststallelseintygForetradareForetradarroll";
        SIGNING_DATE = "UnderskriftFastallelseintygDatum";
    }
}

/// The part of a qualified name after the namespace prefix.
pub fn local_name(concept: &str) -> &str {
    concept.split_once(':').map_or(concept, |(_, local)| local)
}
