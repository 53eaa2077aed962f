//! Builtin documentation sources.

use super::{AdapterKind, Category, SourceDescriptor};

const CPPREFERENCE_LINK_BASE: &str = "https://en.cppreference.com/";

/// The sources available without any configuration.
pub fn builtin_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::inventory("Discord.py", "https://discordpy.readthedocs.io/en/latest")
            .aliases(["d.py", "dpy"])
            .strip_namespaces(["discord.ext.commands.", "discord."]),
        SourceDescriptor::inventory("Python", "https://docs.python.org/3")
            .aliases(["py"])
            .category(Category::Language),
        SourceDescriptor::inventory("ZaneAPI", "https://docs.zaneapi.com/en/latest")
            .aliases(["zane"])
            .language("N/A")
            .category(Category::Api),
        SourceDescriptor::inventory("Pillow", "https://pillow.readthedocs.io/en/stable").aliases(["pil"]),
        SourceDescriptor::inventory("asyncpg", "https://magicstack.github.io/asyncpg/current"),
        SourceDescriptor::inventory("Aiohttp", "https://docs.aiohttp.org/en/stable"),
        SourceDescriptor::inventory("Wand", "https://docs.wand-py.org/en/0.6.5"),
        SourceDescriptor::inventory("NumPy", "https://numpy.org/doc/1.20").aliases(["np"]),
        SourceDescriptor::scrape(
            "Rust",
            "https://doc.rust-lang.org/std/?search=",
            AdapterKind::RenderedSearch {
                link_base: "https://doc.rust-lang.org/".to_string(),
            },
        )
        .display_url("https://doc.rust-lang.org/std/all.html")
        .aliases(["rs"])
        .language("Rust")
        .category(Category::Language),
        SourceDescriptor::inventory("BeautifulSoup", "https://www.crummy.com/software/BeautifulSoup/bs4/doc")
            .aliases(["bs4", "beautifulsoup4"]),
        SourceDescriptor::inventory("Flask", "https://flask.palletsprojects.com/en/1.1.x"),
        SourceDescriptor::inventory("PyMongo", "https://pymongo.readthedocs.io/en/stable"),
        SourceDescriptor::inventory("Motor", "https://motor.readthedocs.io/en/stable"),
        SourceDescriptor::inventory("Yarl", "https://yarl.readthedocs.io/en/latest"),
        SourceDescriptor::inventory("Wavelink", "https://wavelink.readthedocs.io/en/latest"),
        SourceDescriptor::inventory("Requests", "https://docs.python-requests.org/en/master"),
        SourceDescriptor::inventory("SymPy", "https://docs.sympy.org/latest"),
        SourceDescriptor::inventory("SciPy", "https://docs.scipy.org/doc/scipy/reference"),
        SourceDescriptor::inventory("Selenium-py", "https://www.selenium.dev/selenium/docs/api/py")
            .aliases(["selenium-python"]),
        SourceDescriptor::inventory("IPython", "https://ipython.readthedocs.io/en/stable"),
        SourceDescriptor::inventory("twitchio", "https://twitchio.readthedocs.io/en/latest"),
        SourceDescriptor::inventory("PRAW", "https://praw.readthedocs.io/en/latest"),
        SourceDescriptor::inventory("Pandas", "https://pandas.pydata.org/pandas-docs/stable"),
        SourceDescriptor::inventory("PyGame", "https://www.pygame.org/docs"),
        SourceDescriptor::inventory("MatPlotLib", "https://matplotlib.org/stable"),
        // cppreference serves C++ results in the first list and C in the second
        SourceDescriptor::scrape(
            "C",
            "https://cppreference.com/w/c",
            AdapterKind::WikiSearch {
                section: 1,
                link_base: CPPREFERENCE_LINK_BASE.to_string(),
            },
        )
        .language("C")
        .category(Category::Language),
        SourceDescriptor::scrape(
            "C++",
            "https://cppreference.com/w/cpp",
            AdapterKind::WikiSearch {
                section: 0,
                link_base: CPPREFERENCE_LINK_BASE.to_string(),
            },
        )
        .aliases(["cpp"])
        .language("C++")
        .category(Category::Language),
        SourceDescriptor::inventory("SqlAlchemy", "https://docs.sqlalchemy.org/en/14"),
        SourceDescriptor::scrape(
            "Discord.js",
            "https://djsdocs.sorta.moe/v2/embed?src=stable&q=",
            AdapterKind::StructuredApi,
        )
        .display_url("https://discord.js.org/#/docs/main/stable/general/welcome")
        .aliases(["d.js", "djs"])
        .language("JavaScript"),
    ]
}
