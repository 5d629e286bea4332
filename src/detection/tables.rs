//! Static lookup tables driving technology detection
//!
//! Technology names match the canonical catalog seed names. Roles are the
//! product's Japanese UI copy.

/// Role assigned to packages declared only under `devDependencies`
pub const DEV_TOOLING_ROLE: &str = "ビルド・開発ツール";

/// Signals emitted for every parseable `package.json`
pub const MANIFEST_PLATFORM: &[(&str, &str)] =
    &[("Node.js", "ランタイム"), ("JavaScript", "言語")];

/// Probed repository paths, in fetch order
pub const PACKAGE_MANIFEST: &str = "package.json";
pub const PYTHON_REQUIREMENTS: &str = "requirements.txt";
pub const GO_MODULE: &str = "go.mod";
pub const CARGO_MANIFEST: &str = "Cargo.toml";
pub const README: &str = "README.md";
pub const DOCKERFILE: &str = "Dockerfile";
pub const WRANGLER_CONFIG: &str = "wrangler.toml";

pub const PROBED_FILES: &[&str] = &[
    PACKAGE_MANIFEST,
    PYTHON_REQUIREMENTS,
    GO_MODULE,
    CARGO_MANIFEST,
    README,
    DOCKERFILE,
    WRANGLER_CONFIG,
];

/// npm package name → (technology, default role)
pub const PACKAGE_TABLE: &[(&str, &str, &str)] = &[
    ("react", "React", "UIレンダリング"),
    ("react-dom", "React", "UIレンダリング"),
    ("vue", "Vue.js", "UIレンダリング"),
    ("svelte", "Svelte", "UIレンダリング"),
    ("@sveltejs/kit", "SvelteKit", "フルスタックフレームワーク"),
    ("astro", "Astro", "静的サイト生成"),
    ("@angular/core", "Angular", "UIフレームワーク"),
    ("next", "Next.js", "フルスタックフレームワーク"),
    ("nuxt", "Nuxt.js", "フルスタックフレームワーク"),
    ("preact", "Preact", "UIレンダリング"),
    ("solid-js", "Solid", "UIレンダリング"),
    ("tailwindcss", "Tailwind CSS", "スタイリング"),
    ("bootstrap", "Bootstrap", "スタイリング"),
    ("typescript", "TypeScript", "型システム"),
    ("vite", "Vite", "ビルドツール"),
    ("webpack", "Webpack", "バンドラー"),
    ("express", "Express", "APIサーバー"),
    ("fastapi", "FastAPI", "APIサーバー"),
    ("django", "Django", "Webフレームワーク"),
    ("flask", "Flask", "APIサーバー"),
    ("hono", "Hono", "APIサーバー"),
    ("three", "Three.js", "3D描画"),
    ("d3", "D3.js", "データ可視化"),
    ("leaflet", "Leaflet", "地図表示"),
    ("maplibre-gl", "MapLibre", "地図表示"),
    ("ol", "OpenLayers", "地図表示"),
    ("chart.js", "Chart.js", "グラフ描画"),
    ("puppeteer", "Puppeteer", "ブラウザ自動化"),
    ("playwright", "Playwright", "E2Eテスト"),
    ("graphql", "GraphQL", "APIクエリ"),
    ("prisma", "Prisma", "ORM"),
    ("@prisma/client", "Prisma", "ORM"),
    ("drizzle-orm", "Drizzle", "ORM"),
    ("firebase", "Firebase", "BaaS"),
    ("@supabase/supabase-js", "Supabase", "BaaS"),
    ("eslint", "ESLint", "静的解析"),
    ("prettier", "Prettier", "コード整形"),
    ("socket.io", "WebSocket", "リアルタイム通信"),
];

/// Technology → role for signals that carry no package-specific role
pub const TECH_ROLES: &[(&str, &str)] = &[
    ("React", "UIレンダリング"),
    ("Vue.js", "UIレンダリング"),
    ("Svelte", "UIレンダリング"),
    ("Astro", "静的サイト生成"),
    ("Next.js", "フルスタックフレームワーク"),
    ("Python", "バックエンド言語"),
    ("FastAPI", "APIサーバー"),
    ("Django", "Webフレームワーク"),
    ("Flask", "APIサーバー"),
    ("Go", "バックエンド言語"),
    ("Rust", "バックエンド言語"),
    ("Ruby", "バックエンド言語"),
    ("PHP", "バックエンド言語"),
    ("Docker", "コンテナ"),
    ("PostgreSQL", "データベース"),
    ("MySQL", "データベース"),
    ("MongoDB", "データベース"),
    ("Redis", "キャッシュ"),
    ("AWS", "クラウド基盤"),
    ("Cloudflare", "ホスティング・エッジ"),
    ("Vercel", "ホスティング"),
    ("Netlify", "ホスティング"),
];

/// Technology → lower-case README substrings that imply it
pub const README_KEYWORDS: &[(&str, &[&str])] = &[
    ("React", &["react", "jsx"]),
    ("Vue.js", &["vue", "vuejs"]),
    ("Svelte", &["svelte"]),
    ("Astro", &["astro"]),
    ("Next.js", &["next.js", "nextjs"]),
    ("Python", &["python", "pip install"]),
    ("Go", &["golang", "go mod"]),
    ("Rust", &["rust", "cargo"]),
    ("Ruby", &["ruby", "gem install"]),
    ("PHP", &["php", "composer"]),
    ("Docker", &["docker", "dockerfile", "docker-compose"]),
    ("PostgreSQL", &["postgresql", "postgres", "psql"]),
    ("MySQL", &["mysql"]),
    ("MongoDB", &["mongodb", "mongoose"]),
    ("Redis", &["redis"]),
    ("AWS", &["aws", "amazon web services"]),
    ("Cloudflare", &["cloudflare", "wrangler"]),
    ("Vercel", &["vercel"]),
    ("Netlify", &["netlify"]),
];

/// Technology → lower-case README words matched only as whole words
pub const README_WORD_KEYWORDS: &[(&str, &str)] = &[("Go", "go")];

/// Python frameworks recognised inside `requirements.txt`
pub const PYTHON_FRAMEWORKS: &[(&str, &str)] = &[
    ("fastapi", "FastAPI"),
    ("django", "Django"),
    ("flask", "Flask"),
];

/// Marker file → technology implied by its presence
pub const MARKER_FILES: &[(&str, &str)] = &[
    (PYTHON_REQUIREMENTS, "Python"),
    (GO_MODULE, "Go"),
    (CARGO_MANIFEST, "Rust"),
    (DOCKERFILE, "Docker"),
    (WRANGLER_CONFIG, "Cloudflare"),
];

/// Role for a technology outside the package table; empty when unknown
pub fn role_for(tech: &str) -> &'static str {
    TECH_ROLES
        .iter()
        .find(|(name, _)| *name == tech)
        .map(|(_, role)| *role)
        .unwrap_or("")
}

/// Package table entry for an npm package name
pub fn package_entry(package: &str) -> Option<(&'static str, &'static str)> {
    PACKAGE_TABLE
        .iter()
        .find(|(name, _, _)| *name == package)
        .map(|(_, tech, role)| (*tech, *role))
}
