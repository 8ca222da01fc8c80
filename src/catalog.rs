use {crate::locale::FALLBACK_LANGUAGE, std::sync::OnceLock};

/// The messages the launcher ever shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageId {
    ToastTitle,
    ToastMessage,
    ErrorTitle,
    /// Contains a single `%s` slot for the log path.
    ErrorMessage,
}

impl MessageId {
    pub fn key(self) -> &'static str {
        match self {
            MessageId::ToastTitle => "toast_title",
            MessageId::ToastMessage => "toast_message",
            MessageId::ErrorTitle => "error_title",
            MessageId::ErrorMessage => "error_message",
        }
    }
}

const PLACEHOLDER: &str = "%s";

type Translations = &'static [(&'static str, &'static str)];

static MESSAGES: &[(&str, Translations)] = &[
    (
        "toast_title",
        &[
            ("zh-CN", "AMCL正在准备中"),
            ("zh-TW", "AMCL正在準備中"),
            ("en", "AMCL is preparing"),
            ("de", "AMCL wird vorbereitet"),
            ("ja", "AMCLの準備中"),
            ("fr", "AMCL en préparation"),
            ("it", "AMCL in preparazione"),
            ("ar", "AMCL يجري التحضير"),
            ("ru", "AMCL готовится"),
        ],
    ),
    (
        "toast_message",
        &[
            ("zh-CN", "初次启动耗时可能较长，请耐心等待"),
            ("zh-TW", "初次啟動耗時可能較長，請耐心等待"),
            ("en", "Initial startup may take longer, please wait patiently"),
            ("de", "Der erste Start kann länger dauern, bitte haben Sie Geduld"),
            ("ja", "初回起動には時間がかかる場合がありますので、しばらくお待ちください"),
            ("fr", "Le premier démarrage peut prendre plus de temps, veuillez patienter"),
            ("it", "L'avvio iniziale potrebbe richiedere più tempo, si prega di attendere"),
            ("ar", "قد تستغرق عملية البدء الأولى وقتًا أطول، يرجى التحلي بالصبر"),
            ("ru", "Первоначальный запуск может занять больше времени, пожалуйста, подождите"),
        ],
    ),
    (
        "error_title",
        &[
            ("zh-CN", "错误"),
            ("zh-TW", "錯誤"),
            ("en", "Error"),
            ("de", "Fehler"),
            ("ja", "エラー"),
            ("fr", "Erreur"),
            ("it", "Errore"),
            ("ar", "خطأ"),
            ("ru", "Ошибка"),
        ],
    ),
    (
        "error_message",
        &[
            ("zh-CN", "AMCL启动器遇到无法解决的严重问题，异常退出。已将启动器日志保存到 %s，请凭此日志联系开发者寻求解决方案"),
            ("zh-TW", "AMCL啟動器遇到無法解決的嚴重問題，異常退出。已將啟動器日誌保存到 %s，請憑此日誌聯繫開發者尋求解決方案"),
            ("en", "AMCL launcher encountered a critical issue and exited abnormally. Logs saved to %s. Please provide this log to the developer for assistance"),
            ("de", "AMCL-Launcher ist auf ein kritisches Problem gestoßen und wurde unerwartet beendet. Protokolle gespeichert unter %s. Bitte geben Sie dieses Protokoll an den Entwickler weiter"),
            ("ja", "AMCLランチャーが重大な問題に遭遇し異常終了しました。ログは %s に保存されました。開発者にこのログを提供してください"),
            ("fr", "Le lanceur AMCL a rencontré un problème critique et s'est arrêté anormalement. Les journaux sont enregistrés dans %s. Veuillez fournir ce journal au développeur"),
            ("it", "Il launcher AMCL ha riscontrato un problema critico ed è uscito in modo anomalo. Log salvati in %s. Fornire questo log allo sviluppatore"),
            ("ar", "واجه مشغل AMCL مشكلة حرجة وخرج بشكل غير طبيعي. تم حفظ السجلات في %s. يرجى تقديم هذا السجل إلى المطور"),
            ("ru", "Запускатор AMCL столкнулся с критической проблемой и завершил работу аварийно. Логи сохранены в %s. Предоставьте этот журнал разработчику"),
        ],
    ),
];

/// Localized texts keyed by message id and language tag.
///
/// Entries keep the order in which they were declared; the primary-subtag fallback
/// picks the first matching entry in that order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: Vec<(String, Vec<(String, String)>)>,
}

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Catalog::from_entries(
                MESSAGES
                    .iter()
                    .map(|(id, translations)| (*id, translations.iter().copied())),
            )
        })
    }

    pub fn from_entries<I, T, K, L, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        T: IntoIterator<Item = (L, V)>,
        K: Into<String>,
        L: Into<String>,
        V: Into<String>,
    {
        let messages = entries
            .into_iter()
            .map(|(id, translations)| {
                let translations = translations
                    .into_iter()
                    .map(|(tag, text)| (tag.into(), text.into()))
                    .collect();
                (id.into(), translations)
            })
            .collect();
        Self { messages }
    }

    /// Resolves `message_id` for `language_tag`.
    ///
    /// Tries the exact tag, then the first entry sharing the two-letter primary subtag,
    /// then English, then the first entry. Unknown ids yield an empty string.
    pub fn lookup(&self, message_id: &str, language_tag: &str) -> String {
        let Some((_, translations)) = self.messages.iter().find(|(id, _)| id == message_id)
        else {
            log::debug!("No translations for {message_id}");
            return String::new();
        };
        let find = |pred: &dyn Fn(&str) -> bool| {
            translations
                .iter()
                .find(|(tag, _)| pred(tag.as_str()))
                .map(|(_, text)| text.clone())
        };
        let primary = primary_subtag(language_tag);
        find(&|tag| tag == language_tag)
            .or_else(|| find(&|tag| primary_subtag(tag) == primary))
            .or_else(|| find(&|tag| tag == FALLBACK_LANGUAGE))
            .or_else(|| translations.first().map(|(_, text)| text.clone()))
            .unwrap_or_default()
    }

    pub fn text(&self, id: MessageId, language_tag: &str) -> String {
        self.lookup(id.key(), language_tag)
    }
}

fn primary_subtag(tag: &str) -> &str {
    match tag.char_indices().nth(2) {
        Some((end, _)) => &tag[..end],
        None => tag,
    }
}

/// Fills the first `%s` slot of `template` with `value`.
pub fn fill_template(template: &str, value: &str) -> String {
    template.replacen(PLACEHOLDER, value, 1)
}
